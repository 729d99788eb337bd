use serde::{Deserialize, Serialize};

// The serialization within this layer is a dependency leak, but its a pragmatic approach.
// Payload posted to the personality endpoint, built fresh for every submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    // Handle typed into the form at submit time.
    #[serde(rename = "twitterHandle")]
    pub identifier: String,
    // Response token handed out by the verification widget.
    #[serde(rename = "token")]
    pub verification_token: String,
}

// The five personality dimensions scored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigFiveTrait {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl BigFiveTrait {
    // Display order of the result panel.
    pub const ALL: [BigFiveTrait; 5] = [
        BigFiveTrait::Openness,
        BigFiveTrait::Conscientiousness,
        BigFiveTrait::Extraversion,
        BigFiveTrait::Agreeableness,
        BigFiveTrait::Neuroticism,
    ];

    // Wire key of the score, also used as the score element identifier.
    pub fn key(self) -> &'static str {
        match self {
            BigFiveTrait::Openness => "big5_openness",
            BigFiveTrait::Conscientiousness => "big5_conscientiousness",
            BigFiveTrait::Extraversion => "big5_extraversion",
            BigFiveTrait::Agreeableness => "big5_agreeableness",
            BigFiveTrait::Neuroticism => "big5_neuroticism",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BigFiveTrait::Openness => "Openness",
            BigFiveTrait::Conscientiousness => "Conscientiousness",
            BigFiveTrait::Extraversion => "Extraversion",
            BigFiveTrait::Agreeableness => "Agreeableness",
            BigFiveTrait::Neuroticism => "Neuroticism",
        }
    }
}

// Successful prediction returned by the backend. Every score is a fraction in [0, 1].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonalityResult {
    // Fraction of the user's words known to the scoring model.
    pub coverage: f64,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "big5_openness")]
    pub openness: f64,
    #[serde(rename = "big5_conscientiousness")]
    pub conscientiousness: f64,
    #[serde(rename = "big5_extraversion")]
    pub extraversion: f64,
    #[serde(rename = "big5_agreeableness")]
    pub agreeableness: f64,
    #[serde(rename = "big5_neuroticism")]
    pub neuroticism: f64,
    // Number of words analysed; older backends omit it.
    #[serde(rename = "wordCount", default)]
    pub word_count: Option<f64>,
}

impl PersonalityResult {
    pub fn score(&self, dimension: BigFiveTrait) -> f64 {
        match dimension {
            BigFiveTrait::Openness => self.openness,
            BigFiveTrait::Conscientiousness => self.conscientiousness,
            BigFiveTrait::Extraversion => self.extraversion,
            BigFiveTrait::Agreeableness => self.agreeableness,
            BigFiveTrait::Neuroticism => self.neuroticism,
        }
    }
}
