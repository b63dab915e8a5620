//! Static, rule-based regulation content keyed on the last logged quadrant:
//! coping activities, shift-card strategies, gratitude prompts and the 4-7-8
//! breathing phase table. Pacing and animation belong to the view layer.

use rand::seq::SliceRandom;

use crate::models::entry::Quadrant;

/// Six coping suggestions per quadrant.
pub fn coping_activities(quadrant: Quadrant) -> &'static [&'static str] {
    match quadrant {
        Quadrant::Red => &[
            "Take 5 deep breaths",
            "Go for a 10-minute walk",
            "Write down what's bothering you",
            "Listen to calming music",
            "Do some light stretching",
            "Drink a glass of water",
        ],
        Quadrant::Blue => &[
            "Reach out to a friend",
            "Take a warm shower or bath",
            "Do something creative",
            "Read something uplifting",
            "Practice self-compassion",
            "Get some fresh air",
        ],
        Quadrant::Yellow => &[
            "Share your joy with someone",
            "Do something active",
            "Express gratitude",
            "Help someone else",
            "Celebrate the moment",
            "Document this feeling",
        ],
        Quadrant::Green => &[
            "Savor this moment",
            "Practice mindfulness",
            "Continue what you're doing",
            "Reflect on what's working",
            "Share your calm with others",
            "Maintain this state",
        ],
    }
}

pub const GRATITUDE_PROMPTS: [&str; 6] = [
    "What made you smile today?",
    "Who are you grateful for?",
    "What's one thing that went well?",
    "What's a small win you had today?",
    "What's something beautiful you noticed?",
    "What are you proud of yourself for?",
];

pub fn random_gratitude_prompt() -> &'static str {
    GRATITUDE_PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(GRATITUDE_PROMPTS[0])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreathingPhase {
    pub label: &'static str,
    pub seconds: u8,
}

/// The 4-7-8 technique.
pub const BREATHING_PHASES: [BreathingPhase; 3] = [
    BreathingPhase {
        label: "Breathe In",
        seconds: 4,
    },
    BreathingPhase {
        label: "Hold",
        seconds: 7,
    },
    BreathingPhase {
        label: "Breathe Out",
        seconds: 8,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftAction {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

/// Shift-card content shown after a check-in when the user asks for help
/// moving out of (or leaning into) the logged quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftStrategy {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub actions: [ShiftAction; 2],
}

pub fn shift_strategy(quadrant: Quadrant) -> &'static ShiftStrategy {
    match quadrant {
        Quadrant::Red => &ShiftStrategy {
            name: "Red Quadrant",
            title: "High Energy & Unpleasant",
            description: "Let's de-escalate and find some calm.",
            actions: [
                ShiftAction {
                    icon: "🧘‍♂️",
                    title: "4-7-8 Breath",
                    text: "Inhale 4s, hold 7s, exhale 8s.",
                },
                ShiftAction {
                    icon: "💧",
                    title: "Cold Water",
                    text: "Splash your face to reset your nerves.",
                },
            ],
        },
        Quadrant::Blue => &ShiftStrategy {
            name: "Blue Quadrant",
            title: "Low Energy & Unpleasant",
            description: "Small steps can help shift your momentum.",
            actions: [
                ShiftAction {
                    icon: "✅",
                    title: "Micro-Win",
                    text: "Do one task that takes under 2 mins.",
                },
                ShiftAction {
                    icon: "👋",
                    title: "Reach Out",
                    text: "Text a friend just to say hi.",
                },
            ],
        },
        Quadrant::Yellow => &ShiftStrategy {
            name: "Yellow Quadrant",
            title: "High Energy & Pleasant",
            description: "You're glowing! Use this energy wisely.",
            actions: [
                ShiftAction {
                    icon: "🚀",
                    title: "Create",
                    text: "Spend 10 mins on your hardest goal.",
                },
                ShiftAction {
                    icon: "✨",
                    title: "Savor",
                    text: "Identify exactly what is making you happy.",
                },
            ],
        },
        Quadrant::Green => &ShiftStrategy {
            name: "Green Quadrant",
            title: "Low Energy & Pleasant",
            description: "A perfect time for rest and reflection.",
            actions: [
                ShiftAction {
                    icon: "📝",
                    title: "Reflect",
                    text: "Write down one thing you're grateful for.",
                },
                ShiftAction {
                    icon: "🔋",
                    title: "Recharge",
                    text: "Put your phone away for 5 minutes.",
                },
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_quadrant_has_six_coping_activities() {
        for q in Quadrant::ALL {
            assert_eq!(coping_activities(q).len(), 6);
        }
    }

    #[test]
    fn breathing_phases_follow_4_7_8() {
        let seconds: Vec<u8> = BREATHING_PHASES.iter().map(|p| p.seconds).collect();
        assert_eq!(seconds, vec![4, 7, 8]);
    }

    #[test]
    fn shift_strategies_carry_two_actions() {
        for q in Quadrant::ALL {
            let strategy = shift_strategy(q);
            assert!(strategy.name.contains("Quadrant"));
            assert_eq!(strategy.actions.len(), 2);
        }
    }

    #[test]
    fn gratitude_prompt_comes_from_the_fixed_set() {
        let prompt = random_gratitude_prompt();
        assert!(GRATITUDE_PROMPTS.contains(&prompt));
    }
}
