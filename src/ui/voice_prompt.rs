use tracing::debug;

use crate::models::form::FormKind;
use crate::services::submission::FormSession;
use crate::ui::modal::{ClickTarget, Modal};

/// Scroll offset, in pixels, past which the check-in appears.
pub const SCROLL_THRESHOLD: f64 = 300.0;
pub const GREETING: &str = "Hi there! How are you feeling today?";

/// Text plus the delivery settings used for every prompt line.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 0.85,
            pitch: 1.1,
            volume: 0.8,
        }
    }
}

/// Speech synthesis backend. Voice selection is up to the implementation.
pub trait Speaker {
    fn speak(&mut self, utterance: Utterance);
    fn cancel(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    FeelingGreat,
    ABitOff,
    NotFeelingWell,
    ConfusedAboutSymptoms,
}

impl Mood {
    pub const ALL: [Mood; 4] = [
        Mood::FeelingGreat,
        Mood::ABitOff,
        Mood::NotFeelingWell,
        Mood::ConfusedAboutSymptoms,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::FeelingGreat => "Feeling great",
            Mood::ABitOff => "A bit off",
            Mood::NotFeelingWell => "Not feeling well",
            Mood::ConfusedAboutSymptoms => "Confused about my symptoms",
        }
    }

    pub fn response(&self) -> &'static str {
        match self {
            Mood::FeelingGreat => {
                "That's wonderful to hear! Keep it up, and remember, prevention is better than cure."
            }
            Mood::ABitOff => {
                "Thanks for sharing. Sometimes, it helps to track how you feel over time. We're working on something to help with that."
            }
            Mood::NotFeelingWell => {
                "I'm sorry you're feeling that way. I'd love to help, but I'm still learning. I'll be here for you when we launch!"
            }
            Mood::ConfusedAboutSymptoms => {
                "It can be overwhelming sometimes. But you're not alone. I'll be ready soon to help you make sense of your symptoms."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStage {
    Hidden,
    ChoosingMood,
    Responding(Mood),
}

/// Scroll-triggered mood check-in that talks back and offers early access.
///
/// Listeners are explicit: the page calls `activate` on mount, forwards
/// scroll and interaction events, and calls `deactivate` on teardown.
/// Events arriving while inactive are ignored.
pub struct VoicePrompt<S: Speaker> {
    speaker: S,
    active: bool,
    scroll_triggered: bool,
    has_spoken: bool,
    user_interacted: bool,
    stage: PromptStage,
    early_access: Modal<FormSession>,
}

impl<S: Speaker> VoicePrompt<S> {
    pub fn new(speaker: S) -> Self {
        Self {
            speaker,
            active: false,
            scroll_triggered: false,
            has_spoken: false,
            user_interacted: false,
            stage: PromptStage::Hidden,
            early_access: Modal::new(FormSession::new(FormKind::Waitlist)),
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.scroll_triggered = false;
        self.has_spoken = false;
        self.user_interacted = false;
        self.stage = PromptStage::Hidden;
        debug!("Voice prompt activated");
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.speaker.cancel();
        self.early_access.close();
        self.stage = PromptStage::Hidden;
        debug!("Voice prompt deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stage(&self) -> PromptStage {
        self.stage
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn early_access(&self) -> &Modal<FormSession> {
        &self.early_access
    }

    /// Browsers only allow speech after a click, tap or key press.
    pub fn on_user_interaction(&mut self) {
        if self.active {
            self.user_interacted = true;
        }
    }

    /// Returns true when this scroll made the mood selector appear.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        if !self.active || self.scroll_triggered || scroll_y <= SCROLL_THRESHOLD {
            return false;
        }

        self.scroll_triggered = true;
        self.stage = PromptStage::ChoosingMood;
        self.speaker.cancel();

        if !self.has_spoken && self.user_interacted {
            self.speaker.speak(Utterance::new(GREETING));
            self.has_spoken = true;
        }
        true
    }

    pub fn select_mood(&mut self, mood: Mood) {
        if self.stage != PromptStage::ChoosingMood {
            return;
        }
        self.speaker.cancel();
        self.stage = PromptStage::Responding(mood);
        self.speaker.speak(Utterance::new(mood.response()));
    }

    /// "Get Early Access" on the response card.
    pub fn request_early_access(&mut self) {
        if let PromptStage::Responding(_) = self.stage {
            self.speaker.cancel();
            self.early_access.open();
        }
    }

    /// Click on the early-access modal. Dismissing it closes the prompt too.
    pub fn handle_modal_click(&mut self, target: ClickTarget) {
        if self.early_access.handle_click(target) {
            self.close();
        }
    }

    pub fn close(&mut self) {
        self.early_access.close();
        self.stage = PromptStage::Hidden;
        self.speaker.cancel();
    }
}
