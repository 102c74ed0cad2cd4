pub mod composer;
pub mod fetcher;
pub mod fonts;
pub mod placeholder;

pub use composer::{ReportComposer, ReportInput, ReportLayout, ReportRow};
pub use fetcher::{DefaultImageSource, ImageSource, ThumbnailFetcher};
pub use fonts::{FontResolver, ReportFont};
pub use placeholder::placeholder;
