//! Demo Dataset
//!
//! Fictional course evaluations (English and Danish) with gold labels,
//! used by the demo frontend for sample selection and batch accuracy runs.

use std::path::Path;

use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::models::types::SentimentLabel;
use crate::models::types::SentimentLabel::{Negative, Neutral, Positive};

/// Built-in labeled examples
pub const BUILTIN_DATASET: &[(&str, SentimentLabel)] = &[
    ("Great course, learned a lot.", Positive),
    ("Really solid DTU course with clear structure and useful exercises.", Positive),
    ("Nicki was energetic and made MLOps feel practical and fun.", Positive),
    ("The lectures were okay, but the pace felt uneven.", Neutral),
    ("This course was hard, but worth it.", Positive),
    ("Tue’s reinforcement learning course is brutal, yet the learning outcome is amazing.", Positive),
    ("Bjørn explained the core ML ideas clearly and the project was motivating.", Positive),
    ("I liked the course book and how it matched the weekly plan.", Positive),
    ("The feedback on assignments came a bit late.", Neutral),
    ("Finn’s NLP lectures were confusing and the slides had too many gaps.", Negative),
    ("Overall fine, nothing special.", Neutral),
    ("Excellent vocabulary and examples; I left each week with new tools.", Positive),
    ("good course but the typos in the material was annoying lol", Neutral),
    ("Nicki’s demos were sharp, and the TA feedback was super actionable.", Positive),
    ("The course is well organized, but I wish there were more office hours.", Neutral),
    ("Finn taught NLP, but honestly it felt messy and underprepared.", Negative),
    ("Ivana’s cognitive science lectures were inspiring and beautifully presented.", Positive),
    ("The teacher was nice and helpful.", Positive),
    ("Too many mandatory readings, but the exams were fair.", Neutral),
    ("Loved the project work and the way we got iterative feedback.", Positive),
    ("Mega godt kursus!", Positive),
    ("Rigtig god struktur og gode øvelser på DTU, jeg følte mig tryg gennem hele forløbet.", Positive),
    ("Nicki gjorde MLOps levende med hands-on demoer, og feedbacken var hurtig og konkret.", Positive),
    ("Kurset var okay, men tempoet svingede lidt fra uge til uge.", Neutral),
    ("Svært kursus, men jeg lærte virkelig meget.", Positive),
    ("Tue’s reinforcement learning var vildt svært, men undervisningen var stærk og gav mening til sidst.", Positive),
    ("Bjørn var god til at forklare maskinlæring, og projektet bandt det hele sammen.", Positive),
    ("Bogen passede fint til kurset, og kapitlerne blev brugt på en fornuftig måde.", Positive),
    ("Jeg savnede lidt mere feedback på de tidlige afleveringer.", Neutral),
    ("Finns NLP-kursus var rodet, og jeg forstod ofte ikke pointen med øvelserne.", Negative),
    ("Helt fint, ikke noget wow.", Neutral),
    ("Sproget i materialet var præcist, og eksemplerne var elegante og velvalgte.", Positive),
    ("det var ok kursus men opgaverne var lidt mærkelige og der var mange fejl", Neutral),
    ("Nicki var mega engageret, og man fik god, hurtig feedback på pipeline-opgaverne.", Positive),
    ("Kurset fungerede, men der kunne godt være lidt bedre koordinering mellem forelæsning og øvelsestime.", Neutral),
    ("Finn underviser i NLP, men det var frustrerende: uklare krav og for få forklaringer.", Negative),
    ("Ivana var fantastisk—tydelig formidling, stærke diskussioner, og jeg gik derfra med nye perspektiver.", Positive),
    ("Underviseren var hjælpsom, og jeg følte mig set i timerne.", Positive),
    ("For meget læsning nogle uger, men eksamen virkede rimelig.", Neutral),
    ("Jeg elskede projektet, og feedback-loopet gjorde, at vi faktisk blev bedre undervejs.", Positive),
];

/// Dataset in the `[[text, label], ...]` wire shape
pub type DatasetRows = Vec<[String; 2]>;

pub fn builtin() -> DatasetRows {
    BUILTIN_DATASET
        .iter()
        .map(|(text, label)| [text.to_string(), label.to_string()])
        .collect()
}

/// Parse a JSON dataset, checking every gold label
pub fn parse(json: &str) -> AppResult<DatasetRows> {
    let rows: DatasetRows = serde_json::from_str(json).map_err(|e| {
        AppError::with_source(
            ErrorCode::ConfigInvalidDataset,
            "Dataset must be a JSON list of [text, gold_label] pairs",
            e,
        )
    })?;

    for (i, [_, gold]) in rows.iter().enumerate() {
        gold.parse::<SentimentLabel>().map_err(|e| {
            AppError::new(
                ErrorCode::ConfigInvalidDataset,
                format!("Dataset item #{}: {}", i + 1, e.message),
            )
        })?;
    }

    Ok(rows)
}

/// Load from a file, or fall back to the built-in set
pub fn load(path: Option<&Path>) -> AppResult<DatasetRows> {
    let Some(path) = path else {
        return Ok(builtin());
    };

    let json = std::fs::read_to_string(path).map_err(|e| {
        AppError::with_source(
            ErrorCode::ConfigInvalidDataset,
            format!("Failed to read dataset {}", path.display()),
            e,
        )
    })?;
    parse(&json)
}
