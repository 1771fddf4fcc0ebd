//! Reply intents selectable on the form

/// One thematic direction the drafted reply should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Accept,
    Decline,
    Thanks,
    Homework,
    Fee,
    Cheer,
}

impl Intent {
    /// All intents in the order they appear on the form and in the prompt.
    pub const ALL: [Intent; 6] = [
        Intent::Accept,
        Intent::Decline,
        Intent::Thanks,
        Intent::Homework,
        Intent::Fee,
        Intent::Cheer,
    ];

    /// Phrase embedded in the prompt when the intent is selected
    pub fn prompt_label(self) -> &'static str {
        match self {
            Self::Accept => "accept / confirm no problem",
            Self::Decline => "politely decline or apologize",
            Self::Thanks => "express ongoing gratitude",
            Self::Homework => "gently mention homework progress",
            Self::Fee => "include billing/tuition information",
            Self::Cheer => "praise the student's recent effort",
        }
    }

    /// Checkbox caption
    pub fn form_label(self) -> &'static str {
        match self {
            Self::Accept => "Accept / OK",
            Self::Decline => "Decline / Apologize",
            Self::Thanks => "Say thanks",
            Self::Homework => "About homework",
            Self::Fee => "About tuition",
            Self::Cheer => "Praise / Encourage",
        }
    }
}

/// The six independent intent toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentFlags {
    pub accept: bool,
    pub decline: bool,
    pub thanks: bool,
    pub homework: bool,
    pub fee: bool,
    pub cheer: bool,
}

impl IntentFlags {
    pub fn is_set(&self, intent: Intent) -> bool {
        match intent {
            Intent::Accept => self.accept,
            Intent::Decline => self.decline,
            Intent::Thanks => self.thanks,
            Intent::Homework => self.homework,
            Intent::Fee => self.fee,
            Intent::Cheer => self.cheer,
        }
    }

    pub fn set(&mut self, intent: Intent, on: bool) {
        match intent {
            Intent::Accept => self.accept = on,
            Intent::Decline => self.decline = on,
            Intent::Thanks => self.thanks = on,
            Intent::Homework => self.homework = on,
            Intent::Fee => self.fee = on,
            Intent::Cheer => self.cheer = on,
        }
    }

    pub fn toggle(&mut self, intent: Intent) {
        self.set(intent, !self.is_set(intent));
    }

    /// Selected intents in canonical order
    pub fn selected(&self) -> impl Iterator<Item = Intent> + '_ {
        Intent::ALL
            .into_iter()
            .filter(move |intent| self.is_set(*intent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_only_that_intent() {
        let mut flags = IntentFlags::default();
        flags.toggle(Intent::Homework);
        assert!(flags.homework);
        assert_eq!(flags.selected().collect::<Vec<_>>(), vec![Intent::Homework]);

        flags.toggle(Intent::Homework);
        assert_eq!(flags, IntentFlags::default());
    }

    #[test]
    fn test_selected_follows_canonical_order() {
        let mut flags = IntentFlags::default();
        // Set in reverse to make sure insertion order doesn't matter
        flags.set(Intent::Cheer, true);
        flags.set(Intent::Fee, true);
        flags.set(Intent::Accept, true);

        let selected: Vec<_> = flags.selected().collect();
        assert_eq!(selected, vec![Intent::Accept, Intent::Fee, Intent::Cheer]);
    }

    #[test]
    fn test_labels_are_distinct() {
        for (i, a) in Intent::ALL.iter().enumerate() {
            for b in &Intent::ALL[i + 1..] {
                assert_ne!(a.prompt_label(), b.prompt_label());
                assert_ne!(a.form_label(), b.form_label());
            }
        }
    }
}
