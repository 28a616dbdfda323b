//! Natural-language instructions sent to the inference service.
//!
//! The wording is free to change; the parser only depends on the labels
//! (`BEST_TIMESTAMP:`, `REASON:`, `PEOPLE_COUNT:`) and the candidate numbers.

use vprompt_models::PromptStyle;

/// Frame search: one timestamp with exactly one well-lit, sharp person.
pub const PERSON_FRAME: &str = r#"
Find the best timestamp where EXACTLY ONE PERSON is clearly visible.

REQUIREMENTS:
- EXACTLY ONE PERSON in frame (count = 1)
- Face clearly visible and well-lit
- No other people anywhere in frame
- Sharp focus, no blur

If no single-person frames exist:
BEST_TIMESTAMP: NONE

Otherwise:
BEST_TIMESTAMP: [seconds]
REASON: [why this frame is best]
PEOPLE_COUNT: 1
"#;

/// A framing used to produce one raw description candidate.
#[derive(Debug, Clone, Copy)]
pub struct CandidateFraming {
    pub label: &'static str,
    pub instruction: &'static str,
}

/// Candidate framings, in generation order.
pub const CANDIDATE_FRAMINGS: [CandidateFraming; 3] = [
    CandidateFraming {
        label: "action-focused",
        instruction: r#"
Watch this video and describe what the person is doing.
Focus only on actions and movements. Keep it simple and clear.
Give me just the description, nothing else.
"#,
    },
    CandidateFraming {
        label: "complete description",
        instruction: r#"
Watch this video and describe what happens from start to finish.
Include the person's actions and the environment. Keep it natural.
Give me just the description, nothing else.
"#,
    },
    CandidateFraming {
        label: "one sentence",
        instruction: r#"
Describe this video in one clear sentence. What is the main thing happening?
"#,
    },
];

/// Ask the service which candidate matches the video best.
pub fn selection(candidates: &[String]) -> String {
    let listed: String = candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("\nCandidate {}: {}\n", i + 1, c))
        .collect();

    let numbers = (1..=candidates.len())
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"
Watch this video and choose which description best matches what actually happens.

CANDIDATES:{listed}
Which candidate is most accurate? Just tell me the number ({numbers}) and why.
"#
    )
}

/// Rewrite a raw description into `style`.
pub fn style_transform(style: PromptStyle, raw_prompt: &str) -> String {
    let (theme, elements, setting, context) = match style {
        PromptStyle::Anime => (
            "anime style",
            "Anime visual elements (soft lighting, detailed animation, ethereal effects)",
            "Anime-appropriate environments (magical, beautiful, dreamy settings)",
            "with anime flair",
        ),
        PromptStyle::Space => (
            "space/sci-fi style",
            "Sci-fi visual elements (metallic surfaces, cosmic lighting, advanced technology)",
            "Space environments (space station, alien planet, futuristic setting)",
            "in a space context",
        ),
    };

    format!(
        r#"
Transform this description into {theme}:

Original: {raw_prompt}

Make it {name} style by adding:
- {elements}
- {setting}
- Keep the same actions but {context}

Just give me the {name} version description.
"#,
        name = style.as_str()
    )
}
