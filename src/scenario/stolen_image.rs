use crate::{
    foundation::core::{Point, Vec2},
    foundation::error::{AdGraphError, AdGraphResult},
    graph::record::{AttributeKind, Field, Record},
    scenario::model::Scenario,
    snapshot::pipeline::PipelineConfig,
};

/// Label of the attribute naming the state an ad was posted in.
pub const STATE_LABEL: &str = "state";

/// The photo the individual posts in every local ad.
pub const STOLEN_IMAGE: &str = "real-person";

/// Content reused by unrelated posters all over the country.
const GENERIC_IMAGES: [&str; 2] = ["snapchat-logo", "generic-text"];

/// Rough map anchors, x from longitude and y from latitude.
const STATE_ANCHORS: [(&str, f64, f64); 20] = [
    ("AL", 2.04, -1.30),
    ("AZ", -2.94, -0.93),
    ("CA", -4.48, -0.20),
    ("CO", -1.70, 0.25),
    ("FL", 3.06, -2.35),
    ("GA", 2.72, -1.33),
    ("IL", 1.56, 0.50),
    ("MA", 5.04, 1.08),
    ("MI", 2.46, 1.58),
    ("MN", 0.54, 2.08),
    ("MS", 1.46, -1.33),
    ("NC", 3.52, -0.60),
    ("NV", -3.92, 0.33),
    ("NY", 4.30, 1.23),
    ("OH", 2.84, 0.58),
    ("OR", -4.72, 1.48),
    ("PA", 3.88, 0.73),
    ("TN", 2.14, -0.55),
    ("TX", -0.46, -1.63),
    ("WA", -4.70, 2.35),
];

/// Vertical step between ads posted in the same state.
const REPEAT_STEP: f64 = 0.8;

/// Parameters of the "stolen image" scene: one individual's ads in nearby
/// states, a stranger reusing the photo far away, and generic content tying
/// unrelated ads together nationwide.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StolenImageConfig {
    /// One ad per entry, in posting order; a state may repeat.
    pub local_states: Vec<String>,
    /// Where the stranger reposts the photo. `None` leaves that ad out.
    pub stolen_in: Option<String>,
    /// One unrelated ad per entry, each carrying the generic content. The
    /// stranger's ad carries it too.
    pub generic_states: Vec<String>,
    pub radius: f64,
}

impl Default for StolenImageConfig {
    fn default() -> Self {
        let states = |s: &[&str]| s.iter().map(|s| s.to_string()).collect();
        Self {
            local_states: states(&["AL", "TN", "AL", "GA", "MS", "AL"]),
            stolen_in: Some("CA".to_string()),
            generic_states: states(&["NY", "TX", "WA", "IL", "FL"]),
            radius: 0.25,
        }
    }
}

impl StolenImageConfig {
    pub fn validate(&self) -> AdGraphResult<()> {
        if self.local_states.is_empty() {
            return Err(AdGraphError::validation(
                "stolen image scene needs at least one local ad",
            ));
        }
        for state in self.all_states() {
            anchor(state)?;
        }
        Ok(())
    }

    fn all_states(&self) -> impl Iterator<Item = &str> {
        self.local_states
            .iter()
            .chain(&self.stolen_in)
            .chain(&self.generic_states)
            .map(String::as_str)
    }

    pub fn build(&self) -> AdGraphResult<Scenario> {
        self.validate()?;

        let mut records = Vec::new();
        let mut centers = Vec::new();
        let mut placed: Vec<String> = Vec::new();
        let mut push = |state: &str, extra: Vec<Field>| -> AdGraphResult<()> {
            let code = state.trim().to_ascii_uppercase();
            let repeats = placed.iter().filter(|s| **s == code).count();
            centers.push(anchor(&code)? + Vec2::new(0.0, -REPEAT_STEP * repeats as f64));

            let n = records.len() + 1;
            let mut fields = vec![
                Field::new(AttributeKind::Title, format!("Ad {n} ({code})")),
                Field::new(AttributeKind::other(STATE_LABEL), code.clone()),
            ];
            fields.extend(extra);
            records.push(Record {
                name: format!("{code} ad {n}"),
                fields,
            });
            placed.push(code);
            Ok(())
        };

        for (i, state) in self.local_states.iter().enumerate() {
            push(
                state.as_str(),
                vec![
                    Field::new(AttributeKind::Image, STOLEN_IMAGE),
                    Field::new(AttributeKind::Text, format!("local ad text {}", i + 1)),
                ],
            )?;
        }
        if let Some(state) = &self.stolen_in {
            let mut extra = vec![Field::new(AttributeKind::Image, STOLEN_IMAGE)];
            if !self.generic_states.is_empty() {
                extra.push(Field::new(AttributeKind::Image, GENERIC_IMAGES[0]));
            }
            push(state.as_str(), extra)?;
        }
        for state in &self.generic_states {
            push(
                state.as_str(),
                GENERIC_IMAGES
                    .iter()
                    .map(|img| Field::new(AttributeKind::Image, *img))
                    .collect(),
            )?;
        }

        tracing::debug!(
            records = records.len(),
            stolen = self.stolen_in.is_some(),
            "built stolen image scenario"
        );
        Ok(Scenario {
            name: "stolen-image".to_string(),
            records,
            pipeline: PipelineConfig {
                centers: Some(centers),
                radius: self.radius,
                match_kind: AttributeKind::Image,
                ..PipelineConfig::default()
            },
        })
    }
}

/// The "stolen image" scene for `config`.
pub fn stolen_image(config: &StolenImageConfig) -> AdGraphResult<Scenario> {
    config.build()
}

fn anchor(state: &str) -> AdGraphResult<Point> {
    let code = state.trim().to_ascii_uppercase();
    STATE_ANCHORS
        .iter()
        .find(|(s, _, _)| *s == code)
        .map(|&(_, x, y)| Point::new(x, y))
        .ok_or_else(|| AdGraphError::validation(format!("no map anchor for state '{state}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/stolen_image.rs"]
mod tests;
