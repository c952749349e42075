//! Built-in groups, modes, and parameters.

use serde_json::json;

use crate::catalog::{Catalog, OptionItem};
use crate::mode::{ModeSpec, MODE_CUSTOM, MODE_INSPIRATION, MODE_INSTRUMENTAL};
use crate::parameter::{ParameterGroup, ParameterKind, ParameterSpec, ValidationRule};
use crate::tier::Tier;
use crate::visibility::Visibility;

use super::Registry;

pub(super) fn registry(catalog: &Catalog) -> Registry {
    Registry::new(parameters(catalog), modes(), groups())
}

fn groups() -> Vec<ParameterGroup> {
    vec![
        ParameterGroup::new("basic", "Basics", 1).description("Core generation settings"),
        ParameterGroup::new("content", "Content", 2)
            .description("What the music is about, depending on the mode"),
        ParameterGroup::new("style", "Style", 3).description("Genre, mood, and voice"),
        ParameterGroup::new("audio", "Audio", 4).description("Length and tempo"),
        ParameterGroup::new("advanced", "Advanced", 5)
            .description("Arrangement controls for paid plans")
            .collapsible(),
        ParameterGroup::new("instrumentation", "Instrumentation", 6)
            .description("Lead and supporting instruments")
            .collapsible(),
        ParameterGroup::new("tags", "Tags", 7).description("Labels for sorting and search"),
    ]
}

fn modes() -> Vec<ModeSpec> {
    vec![
        ModeSpec::new(MODE_INSPIRATION, "Inspiration")
            .description("Generate music from a description")
            .set_default("vocalType", "random"),
        ModeSpec::new(MODE_CUSTOM, "Custom lyrics")
            .description("Generate music from your own lyrics")
            .set_default("vocalType", "random"),
        ModeSpec::new(MODE_INSTRUMENTAL, "Instrumental")
            .description("Generate music without vocals")
            .clear_default("vocalType"),
    ]
}

fn instrument_options() -> Vec<OptionItem> {
    vec![
        OptionItem::new("piano", "Piano"),
        OptionItem::new("guitar", "Guitar"),
        OptionItem::new("drums", "Drum kit"),
        OptionItem::new("strings", "Strings"),
        OptionItem::new("brass", "Brass"),
        OptionItem::new("synth", "Synthesizer"),
    ]
}

fn parameters(catalog: &Catalog) -> Vec<ParameterSpec> {
    let paid = [Tier::Premium, Tier::Standard];

    let mut main_instruments = vec![OptionItem::new("default", "Model's choice")];
    main_instruments.extend(instrument_options());

    vec![
        // Basics
        ParameterSpec::new("modelId", "Model", ParameterKind::SingleSelect, "basic")
            .required()
            .default_value(catalog.default_model_id().unwrap_or("Chirp v4.0"))
            .api_key("modelId")
            .options(catalog.model_options()),
        ParameterSpec::new("musicName", "Song name", ParameterKind::Text, "basic")
            .required()
            .default_value("")
            .placeholder("Give your track a name...")
            .api_key("name")
            .validation(
                ValidationRule::new()
                    .min_length(1)
                    .max_length(100)
                    .message("Please enter a valid song name"),
            ),
        // Content
        ParameterSpec::new("musicDescription", "Description", ParameterKind::LongText, "content")
            .required()
            .default_value("")
            .placeholder("Describe the style, feeling, or scene you want...")
            .api_key("description")
            .visibility(Visibility::new().mode(MODE_INSPIRATION))
            .validation(
                ValidationRule::new()
                    .min_length(10)
                    .message("Please describe the music in more detail"),
            ),
        ParameterSpec::new("lyrics", "Lyrics", ParameterKind::LongText, "content")
            .required()
            .default_value("")
            .placeholder("Enter your lyrics...")
            .api_key("lyrics")
            .visibility(Visibility::new().mode(MODE_CUSTOM))
            .validation(
                ValidationRule::new()
                    .min_length(10)
                    .message("Please enter valid lyrics"),
            ),
        // Style
        ParameterSpec::new("musicStyle", "Style", ParameterKind::SingleSelect, "style")
            .required()
            .default_value("pop")
            .api_key("style")
            .options(catalog.styles.clone()),
        ParameterSpec::new("mood", "Mood", ParameterKind::SingleSelect, "style")
            .required()
            .default_value("happy")
            .api_key("mood")
            .options(catalog.moods.clone()),
        ParameterSpec::new("vocalType", "Voice", ParameterKind::SingleSelect, "style")
            .default_value("random")
            .api_key("vocalType")
            .visibility(Visibility::new().modes([MODE_INSPIRATION, MODE_CUSTOM]))
            .options(catalog.voices.clone()),
        // Audio
        ParameterSpec::new("duration", "Duration", ParameterKind::SingleSelect, "audio")
            .required()
            .default_value("15")
            .api_key("duration")
            .options(catalog.durations.clone()),
        ParameterSpec::new("tempo", "Tempo", ParameterKind::SingleSelect, "audio")
            .required()
            .default_value("medium")
            .api_key("tempo")
            .options(catalog.tempos.clone()),
        // Advanced
        ParameterSpec::new("complexity", "Complexity", ParameterKind::SingleSelect, "advanced")
            .default_value("medium")
            .api_key("complexity")
            .visibility(Visibility::new().tiers(paid))
            .options(vec![
                OptionItem::new("simple", "Simple")
                    .description("Lean melodies for short videos and ads"),
                OptionItem::new("medium", "Medium")
                    .description("Balanced structure and density"),
                OptionItem::new("complex", "Complex")
                    .description("Rich arrangement with more variation"),
            ])
            .description("Overall arrangement density"),
        // Instrumentation
        ParameterSpec::new(
            "mainInstrument",
            "Lead instrument",
            ParameterKind::SingleSelect,
            "instrumentation",
        )
        .default_value("default")
        .api_key("mainInstrument")
        .visibility(Visibility::new().tiers(paid))
        .options(main_instruments)
        .description("The instrument carrying the melody"),
        ParameterSpec::new(
            "secondaryInstruments",
            "Supporting instruments",
            ParameterKind::MultiSelect,
            "instrumentation",
        )
        .default_value(json!([]))
        .api_key("secondaryInstruments")
        .visibility(Visibility::new().tiers([Tier::Premium]))
        .options(instrument_options())
        .description("Instruments layered under the lead"),
        ParameterSpec::new("hasDrums", "Drums", ParameterKind::Boolean, "instrumentation")
            .default_value(true)
            .api_key("hasDrums")
            .visibility(Visibility::new().modes([MODE_INSPIRATION, MODE_CUSTOM]))
            .description("Whether the track has a drum beat"),
        // Tags
        ParameterSpec::new("tags", "Tags", ParameterKind::TagList, "tags")
            .default_value(json!([]))
            .placeholder("Add a tag...")
            .api_key("tags")
            .visibility(Visibility::new().tiers(paid))
            .description("Labels for sorting and searching your music"),
        ParameterSpec::new("genreTags", "Genre tags", ParameterKind::MultiSelect, "tags")
            .default_value(json!([]))
            .api_key("genreTags")
            .visibility(Visibility::new().tiers([Tier::Premium]))
            .options(vec![
                OptionItem::new("modern", "Modern"),
                OptionItem::new("classic", "Classic"),
                OptionItem::new("electronic", "Electronic"),
                OptionItem::new("organic", "Organic"),
                OptionItem::new("upbeat", "Upbeat"),
                OptionItem::new("melancholic", "Melancholic"),
            ])
            .description("Extra genre hints"),
    ]
}
