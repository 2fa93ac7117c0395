//! Bundled integration block definitions.

pub(super) const DEFINITIONS: &[&str] = &[
    include_str!("builtin/arxiv.json"),
    include_str!("builtin/discord.json"),
    include_str!("builtin/exa.json"),
    include_str!("builtin/google_forms.json"),
    include_str!("builtin/perplexity.json"),
    include_str!("builtin/wealthbox.json"),
    include_str!("builtin/whatsapp.json"),
];
