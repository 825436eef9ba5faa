mod addon;
mod file;
mod search;
mod section;

pub use self::addon::{Addon, Author, Category, CategorySection};
pub use self::file::{AddonFile, AddonFileKey};
pub use self::search::{SearchCriteria, SortMethod};
pub use self::section::Section;

fn sanitize(s: impl AsRef<str>) -> String {
    s.as_ref().trim().to_lowercase().replace('/', "").replace('-', "").replace('_', "").replace(' ', "")
}
