//! Command-line arguments

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use mash_core::filter::{parse_tag_list, FilterSpec};

#[derive(Parser, Debug)]
#[command(name = "mash")]
#[command(about = "A customizable command launcher for storing and executing commands")]
#[command(version)]
#[command(after_help = r#"CONFIG:
    The nearest .mash.json from the current directory upwards is used,
    falling back to ~/.config/mash/config.json.

    {
      "skipIntro": false,
      "items": [
        {"title": "Build", "desc": "Run the build", "cmd": "make", "tags": ["dev"]},
        {"title": "Projects", "desc": "Open a shell there", "cmd": "cd:$HOME/projects"}
      ]
    }

EXAMPLES:
    mash --tag=dev
    mash --tree --tag="tools;infra"
    mash --global --skip-intro

KEY BINDINGS:
    Up/Down, j/k    Move the cursor
    PgUp/PgDn       Move a page
    g/G, Home/End   Jump to first/last item
    /               Filter by title
    Enter           Run the highlighted command (applies the filter while typing one)
    Esc             Clear the filter, or quit
    q, Ctrl-C       Quit"#)]
pub struct Args {
    /// Display a tree view of all commands and tags
    #[arg(long)]
    pub tree: bool,

    /// Load config from ~/.config/mash/config.json
    #[arg(short, long)]
    pub global: bool,

    /// Skip splash screen
    #[arg(long)]
    pub skip_intro: bool,

    /// Show items with the given tags ("TAG1;TAG2"); with no value, only items that have any tag.
    /// May be repeated.
    #[arg(
        long,
        value_name = "TAGS",
        num_args = 0..=1,
        default_missing_value = "",
        action = ArgAction::Append
    )]
    pub tag: Vec<String>,
}

impl Args {
    /// Occurrences apply in order: a list adds tags, a bare `--tag` drops
    /// the tags so far and asks for any tag
    pub fn filter_spec(&self) -> FilterSpec {
        let mut tags = Vec::new();
        let mut require_any_tag = false;
        for value in &self.tag {
            if value.is_empty() {
                tags.clear();
                require_any_tag = true;
            } else {
                tags.extend(parse_tag_list(value));
            }
        }

        let mut spec = FilterSpec::with_tags(tags);
        spec.require_any_tag = require_any_tag;
        spec
    }
}

/// Exit code for a failed parse: help and version are not failures
pub fn exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}
