pub const ARGUMENT_SEPARATOR: char = ';';

/// Raw palette input split into the fuzzy search term and `;` arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInput {
    pub search_term: String,
    pub arguments: Option<Vec<String>>,
}

impl ParsedInput {
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(ARGUMENT_SEPARATOR);
        let search_term = segments.next().unwrap_or_default().to_string();

        if !raw.contains(ARGUMENT_SEPARATOR) {
            return Self {
                search_term,
                arguments: None,
            };
        }

        let arguments = segments
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            search_term,
            arguments: Some(arguments),
        }
    }

    pub fn has_arguments(&self) -> bool {
        self.arguments.is_some()
    }
}
