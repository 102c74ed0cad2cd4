use std::io::Read;
use std::path::{Path, PathBuf};
use crate::errors::ShopError;
use crate::models::Product;
use super::price::parse_price;
use tracing::{debug, info, warn};

const NAME_HEADERS: &[&str] = &["품명", "상품명", "이름", "name", "title"];
const PRICE_HEADERS: &[&str] = &["가격", "price", "금액"];
const IMAGE_HEADERS: &[&str] = &["이미지url", "이미지", "image", "image_url", "img"];

/// Canonical column a header maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Price,
    Image,
}

impl Column {
    pub fn label(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Price => "price",
            Column::Image => "image",
        }
    }
}

/// Map a raw header cell onto its canonical column, if it is one of the accepted spellings.
pub fn classify_header(raw: &str) -> Option<Column> {
    let header = raw.trim_start_matches('\u{feff}').trim().to_lowercase();
    if NAME_HEADERS.contains(&header.as_str()) {
        Some(Column::Name)
    } else if PRICE_HEADERS.contains(&header.as_str()) {
        Some(Column::Price)
    } else if IMAGE_HEADERS.contains(&header.as_str()) {
        Some(Column::Image)
    } else {
        None
    }
}

#[derive(Debug, Default)]
struct ColumnMap {
    name: Option<usize>,
    price: Option<usize>,
    image: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<(usize, usize, usize), ShopError> {
        let mut map = ColumnMap::default();
        for (idx, raw) in headers.iter().enumerate() {
            let slot = match classify_header(raw) {
                Some(Column::Name) => &mut map.name,
                Some(Column::Price) => &mut map.price,
                Some(Column::Image) => &mut map.image,
                None => continue,
            };
            // First matching column wins
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        let missing: Vec<&str> = [
            (map.name, Column::Name),
            (map.price, Column::Price),
            (map.image, Column::Image),
        ]
        .iter()
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, col)| col.label())
        .collect();

        match (map.name, map.price, map.image) {
            (Some(n), Some(p), Some(i)) => Ok((n, p, i)),
            _ => Err(ShopError::Catalog(format!(
                "catalog must have name (품명), price (가격) and image (이미지url) columns; missing: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// An immutable product list loaded from a CSV file.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: PathBuf,
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(source: PathBuf, products: Vec<Product>) -> Self {
        Self { source, products }
    }

    pub fn load(path: &Path) -> Result<Self, ShopError> {
        let file = std::fs::File::open(path).map_err(|e| {
            ShopError::Catalog(format!("cannot open catalog {}: {}", path.display(), e))
        })?;
        let products = parse_catalog(file)?;
        info!(path = %path.display(), products = products.len(), "Loaded catalog");
        Ok(Self::new(path.to_path_buf(), products))
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Product at a 1-based listing position.
    pub fn get(&self, position: usize) -> Option<&Product> {
        position.checked_sub(1).and_then(|i| self.products.get(i))
    }

    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Resolve a UI selector: a 1-based position or an exact product name.
    pub fn lookup(&self, selector: &str) -> Option<&Product> {
        let selector = selector.trim();
        if let Ok(position) = selector.parse::<usize>() {
            if let Some(product) = self.get(position) {
                return Some(product);
            }
        }
        self.find(selector)
    }
}

/// Parse CSV content into products, normalizing headers and prices.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<Product>, ShopError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let (name_idx, price_idx, image_idx) = ColumnMap::from_headers(&headers)?;

    let mut products = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        let name = record.get(name_idx).unwrap_or("").to_string();
        if name.is_empty() {
            warn!(row = line + 2, "Skipping catalog row without a name");
            continue;
        }
        let raw_price = record.get(price_idx).unwrap_or("");
        let price = parse_price(raw_price);
        if price == 0 {
            debug!(product = %name, raw = %raw_price, "Price parsed as zero");
        }
        products.push(Product {
            name,
            price,
            image: record.get(image_idx).unwrap_or("").to_string(),
        });
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header_synonyms() {
        assert_eq!(classify_header("품명"), Some(Column::Name));
        assert_eq!(classify_header(" Title "), Some(Column::Name));
        assert_eq!(classify_header("금액"), Some(Column::Price));
        assert_eq!(classify_header("Image_URL"), Some(Column::Image));
        assert_eq!(classify_header("\u{feff}name"), Some(Column::Name));
        assert_eq!(classify_header("category"), None);
    }

    #[test]
    fn test_parse_catalog_korean_headers() {
        let csv = "품명,가격,이미지url\n카레 가루,\"3,000원\",https://example.com/curry.png\n감자,1500,potato.png\n";
        let products = parse_catalog(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "카레 가루");
        assert_eq!(products[0].price, 3000);
        assert_eq!(products[1].image, "potato.png");
    }

    #[test]
    fn test_parse_catalog_extra_columns_and_order() {
        let csv = "img,category,price,name\na.png,food,2000,Apple\n";
        let products = parse_catalog(csv.as_bytes()).unwrap();
        assert_eq!(products[0].name, "Apple");
        assert_eq!(products[0].price, 2000);
        assert_eq!(products[0].image, "a.png");
    }

    #[test]
    fn test_parse_catalog_missing_column() {
        let csv = "name,price\nApple,1000\n";
        let err = parse_catalog(csv.as_bytes()).unwrap_err();
        match err {
            ShopError::Catalog(msg) => assert!(msg.contains("image")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_catalog_short_rows_and_bad_prices() {
        let csv = "name,price,image\nApple,,a.png\nPear,ask me\n,500,x.png\n";
        let products = parse_catalog(csv.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, 0);
        assert_eq!(products[1].price, 0);
        assert_eq!(products[1].image, "");
    }

    #[test]
    fn test_lookup_by_position_and_name() {
        let catalog = Catalog::new(
            PathBuf::from("mem"),
            vec![
                Product { name: "Apple".into(), price: 1000, image: String::new() },
                Product { name: "Pear".into(), price: 1200, image: String::new() },
            ],
        );
        assert_eq!(catalog.lookup("2").unwrap().name, "Pear");
        assert_eq!(catalog.lookup("Apple").unwrap().price, 1000);
        assert!(catalog.lookup("3").is_none());
        assert!(catalog.lookup("Kiwi").is_none());
    }
}
