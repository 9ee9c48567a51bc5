use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::models::ScoreBreakdown;

/// Display names for the languages the frontend ships; other codes are used as-is
const LANGUAGE_NAMES: [(&str, &str); 39] = [
    ("en", "English"), ("de", "German"), ("fr", "French"), ("es", "Spanish"),
    ("it", "Italian"), ("pt", "Portuguese"), ("nl", "Dutch"), ("sv", "Swedish"),
    ("no", "Norwegian"), ("da", "Danish"), ("fi", "Finnish"), ("is", "Icelandic"),
    ("ga", "Irish"), ("cy", "Welsh"), ("mt", "Maltese"), ("lb", "Luxembourgish"),
    ("ca", "Catalan"), ("gl", "Galician"), ("eu", "Basque"), ("pl", "Polish"),
    ("cs", "Czech"), ("sk", "Slovak"), ("hu", "Hungarian"), ("ro", "Romanian"),
    ("bg", "Bulgarian"), ("hr", "Croatian"), ("sr", "Serbian"), ("sl", "Slovene"),
    ("mk", "Macedonian"), ("sq", "Albanian"), ("bs", "Bosnian"), ("et", "Estonian"),
    ("lv", "Latvian"), ("lt", "Lithuanian"), ("el", "Greek"), ("tr", "Turkish"),
    ("ru", "Russian"), ("uk", "Ukrainian"), ("be", "Belarusian"),
];

pub const OTHER_PERSON_LABEL: &str = "the other person";

pub fn language_name(code: &str) -> &str {
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}

/// Which side of the pairing the reader is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perspective {
    A,
    B,
}

impl Perspective {
    fn label(&self) -> &'static str {
        match self {
            Perspective::A => "A",
            Perspective::B => "B",
        }
    }
}

/// Pick the response language: explicit request, then the viewer's primary, then English
///
/// Only the base subtag is kept (`pt-BR` becomes `pt`).
pub fn resolve_language(requested: Option<&str>, viewer_primary: Option<&str>) -> String {
    [requested, viewer_primary]
        .into_iter()
        .flatten()
        .map(|raw| raw.trim().to_lowercase())
        .find(|raw| !raw.is_empty())
        .and_then(|raw| raw.split('-').next().map(str::to_string))
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| "en".to_string())
}

/// Positive contributions from chart factors, largest first
///
/// Language points are left out so commentary stays about the charts.
pub fn top_positive_contributors(breakdown: &ScoreBreakdown, limit: usize) -> Vec<(String, i32)> {
    let core = &breakdown.core;
    let secondary = &breakdown.secondary;

    let mut contributors: Vec<(String, i32)> = [
        ("Sun-Sun", core.sun_sun),
        ("Moon-Moon", core.moon_moon),
        ("Sun-Moon(A→B)", core.sun_moon_ab),
        ("Sun-Moon(B→A)", core.sun_moon_ba),
        ("Venus→Mars", secondary.venus_mars),
        ("Mars→Venus", secondary.mars_venus),
        ("same_sun_element", secondary.same_sun_element),
    ]
    .into_iter()
    .chain(breakdown.houses.map(|h| ("houses", h.house_bonus_total)))
    .chain(breakdown.angles.entries())
    .filter(|(_, points)| *points > 0)
    .map(|(name, points)| (name.to_string(), points))
    .collect();

    contributors.sort_by(|a, b| b.1.cmp(&a.1));
    contributors.truncate(limit);
    contributors
}

/// Instruction lines handed to the commentary process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryPrompt {
    pub language: String,
    pub perspective: Perspective,
    pub lines: Vec<String>,
}

impl CommentaryPrompt {
    pub fn build(
        breakdown: &ScoreBreakdown,
        perspective: Perspective,
        language: &str,
    ) -> Result<Self, MatchError> {
        let mut chart_only = serde_json::to_value(breakdown)?;
        if let Some(sections) = chart_only.as_object_mut() {
            sections.remove("lang");
        }

        let lines = vec![
            format!("RESPONSE LANGUAGE CODE: {}", language),
            format!(
                "Please respond ONLY in {} ({}). Do not use any other language.",
                language_name(language),
                language
            ),
            format!("Perspective: you are side {}", perspective.label()),
            format!("Breakdown (languages removed): {}", serde_json::to_string(&chart_only)?),
            "Write a friendly, helpful interpretation based only on chart/radix aspects \
             (core, houses, angles). Do not discuss languages. Do not mention scores, points, \
             or the word 'match'. Do not include section headings or bullet lists; write \
             continuous prose. Address 'you' and refer to the other simply as 'the other \
             person'. Do not refer to A or B."
                .to_string(),
        ];

        Ok(Self {
            language: language.to_string(),
            perspective,
            lines,
        })
    }

    pub fn to_json(&self) -> Result<String, MatchError> {
        Ok(serde_json::to_string(&self.lines)?)
    }
}

struct SanitizePatterns {
    a_and_b: Regex,
    b_and_a: Regex,
    match_ref: Regex,
    points: Regex,
    side_a: Regex,
    side_b: Regex,
}

fn patterns() -> &'static SanitizePatterns {
    static PATTERNS: OnceLock<SanitizePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let re = |p: &str| Regex::new(p).expect("sanitize pattern is valid");
        SanitizePatterns {
            a_and_b: re(r"\bA and B\b"),
            b_and_a: re(r"\bB and A\b"),
            match_ref: re(r"(?i)Match\s*#?\d+"),
            points: re(r"(?i)\b\d+\s*points\b"),
            side_a: re(r"\bA\b"),
            side_b: re(r"\bB\b"),
        }
    })
}

/// Rewrite side letters to "you" and the other label; strip match ids and point counts
pub fn sanitize_comment(text: &str, perspective: Perspective, other_label: &str) -> String {
    let p = patterns();
    let you_and_other = format!("you and {}", other_label);
    let other_and_you = format!("{} and you", other_label);
    let t = p.a_and_b.replace_all(text, regex::NoExpand(&you_and_other)).into_owned();
    let t = p.b_and_a.replace_all(&t, regex::NoExpand(&other_and_you)).into_owned();
    let t = p.match_ref.replace_all(&t, "").into_owned();
    let t = p.points.replace_all(&t, "").into_owned();

    let (own, other) = match perspective {
        Perspective::A => (&p.side_a, &p.side_b),
        Perspective::B => (&p.side_b, &p.side_a),
    };
    let t = own.replace_all(&t, "you").into_owned();
    other.replace_all(&t, regex::NoExpand(other_label)).into_owned()
}

/// Turns a prompt into free text; implementations may call external processes
#[async_trait]
pub trait CommentaryGenerator: Send + Sync {
    async fn generate(&self, prompt: &CommentaryPrompt) -> Result<String, MatchError>;
}

/// Runs an external command with the JSON-encoded prompt lines as last argument
#[derive(Debug, Clone)]
pub struct CliCommentaryGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CliCommentaryGenerator {
    pub fn new(program: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            timeout,
        }
    }
}

#[async_trait]
impl CommentaryGenerator for CliCommentaryGenerator {
    async fn generate(&self, prompt: &CommentaryPrompt) -> Result<String, MatchError> {
        let payload = prompt.to_json()?;

        let mut command = tokio::process::Command::new(&self.program);
        command.args(&self.args).arg(payload).kill_on_drop(true);

        tracing::debug!("Running commentary command {} (lang {})", self.program, prompt.language);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| MatchError::Commentary(format!("timed out after {:?}", self.timeout)))?
            .map_err(|e| MatchError::Commentary(format!("failed to run {}: {}", self.program, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() { stdout } else { stderr };
            return Err(MatchError::Commentary(format!("{}: {}", output.status, detail)));
        }

        Ok(stdout)
    }
}

/// Generate and sanitise commentary for one side of a pairing
pub async fn annotate(
    generator: &dyn CommentaryGenerator,
    breakdown: &ScoreBreakdown,
    perspective: Perspective,
    language: &str,
) -> Result<String, MatchError> {
    let prompt = CommentaryPrompt::build(breakdown, perspective, language)?;
    let text = generator.generate(&prompt).await?;
    Ok(sanitize_comment(text.trim(), perspective, OTHER_PERSON_LABEL))
}
