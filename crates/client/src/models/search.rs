use std::fmt::{Display, Formatter, Result as FmtResult};

/// Sort order for criteria-based addon search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMethod {
    #[default]
    Featured,
    Popularity,
    LastUpdated,
    Name,
    Author,
    TotalDownloads,
    Category,
    GameVersion,
}
impl SortMethod {
    /// Query-parameter value; the upstream expects the bare variant name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMethod::Featured => "Featured",
            SortMethod::Popularity => "Popularity",
            SortMethod::LastUpdated => "LastUpdated",
            SortMethod::Name => "Name",
            SortMethod::Author => "Author",
            SortMethod::TotalDownloads => "TotalDownloads",
            SortMethod::Category => "Category",
            SortMethod::GameVersion => "GameVersion",
        }
    }
}
impl Display for SortMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Search criteria for the upstream `/addon/search` endpoint.
///
/// Constructed per call and discarded after use. Defaults mirror the
/// upstream's: unconstrained section/category are encoded as `-1` and
/// always sent, optional strings are omitted entirely when unset.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub game_id: i32,
    pub section_id: i32,
    pub category_id: i32,
    pub sort: SortMethod,
    pub sort_descending: bool,
    pub game_version: Option<String>,
    /// Page offset, in records.
    pub index: u32,
    pub page_size: u32,
    pub search_filter: Option<String>,
}
impl SearchCriteria {
    pub const DEFAULT_PAGE_SIZE: u32 = 1000;

    pub fn new(game_id: i32) -> Self {
        Self {
            game_id,
            section_id: -1,
            category_id: -1,
            sort: SortMethod::default(),
            sort_descending: true,
            game_version: None,
            index: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            search_filter: None,
        }
    }

    pub fn with_section(mut self, section_id: i32) -> Self {
        self.section_id = section_id;
        self
    }

    pub fn with_category(mut self, category_id: i32) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn with_sort(mut self, sort: SortMethod, descending: bool) -> Self {
        self.sort = sort;
        self.sort_descending = descending;
        self
    }

    pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = Some(version.into());
        self
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.search_filter = Some(filter.into());
        self
    }

    /// Encode as query pairs for the search endpoint.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("gameId", self.game_id.to_string()),
            ("sectionId", self.section_id.to_string()),
            ("categoryId", self.category_id.to_string()),
            ("index", self.index.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("sort", self.sort.to_string()),
            ("sortDescending", self.sort_descending.to_string()),
        ];
        if let Some(version) = &self.game_version {
            query.push(("gameVersion", version.clone()));
        }
        if let Some(filter) = &self.search_filter {
            query.push(("searchFilter", filter.clone()));
        }
        query
    }
}
