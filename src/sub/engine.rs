use crate::sub::errors::SubstituteError;
use crate::sub::pattern::Pattern;

/// A captured region of the haystack: `[start, end)` in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Ordered replacement values. Index 0 is the implicit (piped) value, the
/// explicit values follow in argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionList {
    values: Vec<Vec<u8>>,
}

impl SubstitutionList {
    pub fn new(implicit: impl Into<Vec<u8>>) -> Self {
        Self {
            values: vec![implicit.into()],
        }
    }

    /// Build `[implicit, explicit...]`.
    pub fn with_explicit<I, S>(implicit: impl Into<Vec<u8>>, explicit: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        let mut list = Self::new(implicit);
        list.values.extend(explicit.into_iter().map(Into::into));
        list
    }

    pub fn push(&mut self, value: impl Into<Vec<u8>>) {
        self.values.push(value.into());
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.values.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One resolved group: where it sits in the haystack and which value replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSubstitution {
    /// 1-based group number, in declaration order
    pub group: usize,
    pub span: Span,
    /// Index into the substitution list
    pub index: usize,
}

/// Match `pattern` once against `haystack` and resolve every group to a
/// substitution index.
///
/// Every check runs here, so a returned plan can always be assembled.
pub fn plan(
    haystack: &[u8],
    pattern: &Pattern,
    substitutions: &SubstitutionList,
) -> Result<Vec<GroupSubstitution>, SubstituteError> {
    let captures = pattern
        .regex()
        .captures(haystack)
        .ok_or(SubstituteError::NoMatch)?;

    let spans: Vec<Option<Span>> = (1..captures.len())
        .map(|i| {
            captures.get(i).map(|m| Span {
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();

    let labels = pattern.labels();
    if labels.len() != spans.len() {
        return Err(SubstituteError::GroupCountMismatch {
            groups: labels.len(),
            spans: spans.len(),
        });
    }

    tracing::debug!(
        expression = pattern.as_str(),
        groups = labels.len(),
        "pattern matched"
    );

    let mut resolved = Vec::with_capacity(spans.len());
    let mut previous_end = 0;

    for (i, (label, span)) in labels.iter().zip(spans).enumerate() {
        let group = i + 1;

        let name = label
            .as_deref()
            .ok_or(SubstituteError::InvalidGroupName { group, name: None })?;
        let index: usize = name
            .parse()
            .map_err(|_| SubstituteError::InvalidGroupName {
                group,
                name: Some(name.to_string()),
            })?;

        if index >= substitutions.len() {
            return Err(SubstituteError::GroupIndexOutOfRange {
                group,
                index,
                available: substitutions.len(),
            });
        }

        let span = span.ok_or(SubstituteError::UnmatchedGroup { group })?;

        // Nested groups are the only way a later-declared group can start
        // before the previous one ends.
        if span.start < previous_end {
            return Err(SubstituteError::OverlappingGroups {
                group,
                start: span.start,
                end: span.end,
                previous_end,
            });
        }
        previous_end = span.end;

        tracing::trace!(group, index, start = span.start, end = span.end, "group resolved");
        resolved.push(GroupSubstitution { group, span, index });
    }

    Ok(resolved)
}

/// Replace every captured group of the first match with its substitution
/// value. Text outside the groups is copied through unchanged.
pub fn substitute(
    haystack: &[u8],
    pattern: &Pattern,
    substitutions: &SubstitutionList,
) -> Result<Vec<u8>, SubstituteError> {
    let groups = plan(haystack, pattern, substitutions)?;

    let inserted: usize = groups
        .iter()
        .filter_map(|g| substitutions.get(g.index))
        .map(<[u8]>::len)
        .sum();
    let removed: usize = groups.iter().map(|g| g.span.len()).sum();
    let mut output = Vec::with_capacity(haystack.len() + inserted - removed);

    let mut cursor = 0;
    for group in &groups {
        output.extend_from_slice(&haystack[cursor..group.span.start]);
        if let Some(value) = substitutions.get(group.index) {
            output.extend_from_slice(value);
        }
        cursor = group.span.end;
    }
    output.extend_from_slice(&haystack[cursor..]);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(explicit: &[&str]) -> SubstitutionList {
        SubstitutionList::with_explicit("", explicit.iter().copied())
    }

    fn run(haystack: &str, expression: &str, list: &SubstitutionList) -> Result<String, SubstituteError> {
        let pattern = Pattern::new(expression)?;
        substitute(haystack.as_bytes(), &pattern, list)
            .map(|out| String::from_utf8(out).expect("test output is UTF-8"))
    }

    #[test]
    fn test_single_group() {
        let out = run("Hello World", r"Hello (?P<1>.*)", &subs(&["Foo"])).unwrap();
        assert_eq!(out, "Hello Foo");
    }

    #[test]
    fn test_groups_walk_in_declaration_order() {
        let out = run(
            "Hello World",
            r"(?P<2>Hello) (?P<1>World)",
            &subs(&["Foo", "Bar"]),
        )
        .unwrap();
        assert_eq!(out, "Bar Foo");
    }

    #[test]
    fn test_implicit_group_zero() {
        let list = SubstitutionList::new("Hello");
        let out = run("Hello World", r"Hello(?P<0>\s)World", &list).unwrap();
        assert_eq!(out, "HelloHello WorldWorld");
    }

    #[test]
    fn test_surrounding_text_passes_through() {
        let out = run(
            "Goblin is pretty cool bro.",
            r"(?P<0>is pretty cool)",
            &SubstitutionList::new("deez nutz"),
        )
        .unwrap();
        assert_eq!(out, "Goblin deez nutz bro.");
    }

    #[test]
    fn test_zero_groups_returns_haystack() {
        let out = run("Hello World", r"o W", &subs(&[])).unwrap();
        assert_eq!(out, "Hello World");
    }

    #[test]
    fn test_only_first_match_replaced() {
        let out = run("a1 a2 a3", r"a(?P<1>\d)", &subs(&["X"])).unwrap();
        assert_eq!(out, "aX a2 a3");
    }

    #[test]
    fn test_reused_label_inserts_same_value() {
        let out = run("left-right", r"(?P<1>left)-(?P<1>right)", &subs(&["x"])).unwrap();
        assert_eq!(out, "x-x");
    }

    #[test]
    fn test_leading_zero_label() {
        let out = run("abc", r"a(?P<01>b)c", &subs(&["B"])).unwrap();
        assert_eq!(out, "aBc");
    }

    #[test]
    fn test_empty_group_inserts() {
        let out = run("ab", r"a(?P<1>)b", &subs(&["-"])).unwrap();
        assert_eq!(out, "a-b");
    }

    #[test]
    fn test_no_match() {
        let err = run("Hello World", "zzz", &subs(&[])).unwrap_err();
        assert!(matches!(err, SubstituteError::NoMatch));
    }

    #[test]
    fn test_unnamed_group() {
        let err = run("Hello World", r"(Hello) World", &subs(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            SubstituteError::InvalidGroupName { group: 1, name: None }
        ));
        assert_eq!(err.to_string(), "group 1 is not named");
    }

    #[test]
    fn test_non_numeric_group_name() {
        let err = run("Hello World", r"(?P<1>Hello) (?P<w>World)", &subs(&["x"])).unwrap_err();
        match err {
            SubstituteError::InvalidGroupName { group, name } => {
                assert_eq!(group, 2);
                assert_eq!(name.as_deref(), Some("w"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let err = run("Hello World", r"Hello (?P<5>World)", &subs(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            SubstituteError::GroupIndexOutOfRange {
                group: 1,
                index: 5,
                available: 2
            }
        ));
    }

    #[test]
    fn test_index_one_past_end() {
        let err = run("Hello World", r"Hello (?P<1>World)", &subs(&[])).unwrap_err();
        assert!(matches!(err, SubstituteError::GroupIndexOutOfRange { index: 1, .. }));
    }

    #[test]
    fn test_nested_groups_rejected() {
        let err = run("abc", r"(?P<1>a(?P<2>b))c", &subs(&["x", "y"])).unwrap_err();
        assert!(matches!(
            err,
            SubstituteError::OverlappingGroups { group: 2, .. }
        ));
    }

    #[test]
    fn test_unmatched_optional_group_rejected() {
        let err = run("ac", r"a(?P<1>b)?c", &subs(&["x"])).unwrap_err();
        assert!(matches!(err, SubstituteError::UnmatchedGroup { group: 1 }));
    }

    #[test]
    fn test_plan_reports_spans() {
        let pattern = Pattern::new(r"(?P<2>Hello) (?P<1>World)").unwrap();
        let groups = plan(b"Hello World", &pattern, &subs(&["a", "b"])).unwrap();
        assert_eq!(
            groups,
            vec![
                GroupSubstitution {
                    group: 1,
                    span: Span { start: 0, end: 5 },
                    index: 2
                },
                GroupSubstitution {
                    group: 2,
                    span: Span { start: 6, end: 11 },
                    index: 1
                },
            ]
        );
    }

    #[test]
    fn test_non_utf8_haystack_passes_through() {
        let pattern = Pattern::new(r"(?P<1>b)").unwrap();
        let haystack = [0xff, b'b', 0xfe];
        let out = substitute(&haystack, &pattern, &subs(&["B"])).unwrap();
        assert_eq!(out, vec![0xff, b'B', 0xfe]);
    }

    #[test]
    fn test_label_starting_with_digit_is_not_an_integer() {
        let err = run("x", r"(?P<1a>x)", &subs(&["X"])).unwrap_err();
        match err {
            SubstituteError::InvalidGroupName { group, name } => {
                assert_eq!(group, 1);
                assert_eq!(name.as_deref(), Some("1a"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dot_spans_invalid_utf8() {
        let pattern = Pattern::new(r"Hello (?P<1>.*)").unwrap();
        let out = substitute(b"Hello \xffWorld", &pattern, &subs(&["Foo"])).unwrap();
        assert_eq!(out, b"Hello Foo".to_vec());
    }
}
