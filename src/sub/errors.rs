use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubstituteError {
    #[error("invalid regex expression: {0}")]
    PatternCompile(#[from] regex::Error),

    #[error("no matches for regex input")]
    NoMatch,

    #[error("the amount of named groups ({groups}) does not equal the amount of matches made ({spans})")]
    GroupCountMismatch { groups: usize, spans: usize },

    /// `name` is `None` when the group carries no label at all.
    #[error("group {group} {}", describe_bad_name(.name))]
    InvalidGroupName { group: usize, name: Option<String> },

    #[error("cannot reference argument {index} from group {group} ({available} substitutes available)")]
    GroupIndexOutOfRange {
        group: usize,
        index: usize,
        available: usize,
    },

    #[error("group {group} did not participate in the match")]
    UnmatchedGroup { group: usize },

    #[error("group {group} span [{start}, {end}) overlaps the previous group ending at {previous_end}")]
    OverlappingGroups {
        group: usize,
        start: usize,
        end: usize,
        previous_end: usize,
    },
}

fn describe_bad_name(name: &Option<String>) -> String {
    match name {
        None => "is not named".to_string(),
        Some(name) => format!("({name}) name cannot be converted to an integer"),
    }
}
