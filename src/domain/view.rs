use crate::domain::entities::{BigFiveTrait, PersonalityResult};

// Formats a [0, 1] fraction as a percentage with at most one decimal place.
// Halves round away from zero and trailing zeros are dropped, so 0.4 renders as "40%".
pub fn percent_text(fraction: f64) -> String {
    let rounded = (fraction * 1000.0).round() / 10.0;
    format!("{rounded}%")
}

// One rendered trait: its label text and the width of its bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub dimension: BigFiveTrait,
    pub text: String,
    // Bar width in percent of the full track, not rounded.
    pub bar_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultHeader {
    pub user_name: String,
    pub profile_url: String,
    pub coverage_text: String,
    pub word_count: Option<u64>,
}

impl ResultHeader {
    pub fn headline(&self) -> String {
        let mut line = format!(
            "Your Personality for @{}. Word coverage: {}.",
            self.user_name, self.coverage_text
        );
        if let Some(words) = self.word_count {
            line.push_str(&format!(" Words analysed: {words}."));
        }
        line
    }
}

// Everything the result panel shows for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub header: ResultHeader,
    pub scores: Vec<ScoreView>,
}

impl ResultView {
    pub fn from_result(result: &PersonalityResult, profile_base_url: &str) -> Self {
        let scores = BigFiveTrait::ALL
            .iter()
            .map(|&dimension| {
                let value = result.score(dimension);
                ScoreView {
                    dimension,
                    text: percent_text(value),
                    bar_width: value * 100.0,
                }
            })
            .collect();

        let header = ResultHeader {
            user_name: result.user_name.clone(),
            profile_url: format!("{profile_base_url}{}", result.user_name),
            coverage_text: percent_text(result.coverage),
            word_count: result
                .word_count
                .filter(|count| count.is_finite() && *count >= 0.0)
                .map(|count| count.round() as u64),
        };

        Self { header, scores }
    }

    pub fn score(&self, dimension: BigFiveTrait) -> Option<&ScoreView> {
        self.scores.iter().find(|score| score.dimension == dimension)
    }
}
