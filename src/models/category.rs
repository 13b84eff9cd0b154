/// Names a category when none are configured.
pub(crate) const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Rent",
    "Transportation",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Shopping",
    "Education",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) name: String,
}

impl Category {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub(crate) fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES.iter().map(|n| Category::new(*n)).collect()
    }

    /// Find a category by name (case-insensitive) in a slice.
    pub(crate) fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
        let lower = name.trim().to_lowercase();
        categories.iter().find(|c| c.name.to_lowercase() == lower)
    }

    /// Split `text` into a leading category name and the remainder.
    ///
    /// Category names may contain spaces, so the longest configured name that
    /// prefixes `text` (case-insensitive, on a word boundary) wins.
    pub(crate) fn split_leading<'a, 'b>(
        categories: &'a [Category],
        text: &'b str,
    ) -> Option<(&'a Category, &'b str)> {
        let text = text.trim_start();
        categories
            .iter()
            .filter(|c| {
                let len = c.name.len();
                text.get(..len)
                    .is_some_and(|head| head.eq_ignore_ascii_case(&c.name))
                    && text[len..].chars().next().map_or(true, char::is_whitespace)
            })
            .max_by_key(|c| c.name.len())
            .map(|c| (c, text[c.name.len()..].trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
