//! Usage listing for `goblin genusage`.

use clap::Command;

const USAGE_TEMPLATE: &str = "{usage-heading} {usage}\n\n{all-args}";

/// Usage text of one command: the usage line and its arguments, no about text.
pub fn usage_text(command: &Command) -> String {
    let mut command = command.clone().help_template(USAGE_TEMPLATE);
    let mut text = command.render_help().to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Usage of every subcommand of `root`.
///
/// Plain mode lists every subcommand, the generated `help` included. Markdown
/// mode emits a `## name` section per visible subcommand with the usage in a
/// fenced block.
pub fn render_usage(root: &Command, markdown: bool) -> String {
    let mut root = root.clone();
    root.build();

    let mut out = String::new();
    for sub in root.get_subcommands() {
        if !markdown {
            out.push_str(&usage_text(sub));
            out.push('\n');
            continue;
        }

        if sub.is_hide_set() || sub.get_name() == "help" {
            continue;
        }

        out.push_str("## ");
        out.push_str(sub.get_name());
        out.push('\n');
        if let Some(about) = sub.get_about() {
            out.push_str(&about.to_string());
        }
        out.push_str("\n```\n");
        if let Some(long) = sub.get_long_about() {
            out.push_str(&long.to_string());
            out.push_str("\n\n");
        }
        out.push_str(&usage_text(sub));
        out.push_str("```\n");
    }
    out
}
