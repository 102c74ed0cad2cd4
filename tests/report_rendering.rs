use async_trait::async_trait;
use shopmission::errors::ShopError;
use shopmission::imaging::composer::{BALANCE_OK, BALANCE_OVER};
use shopmission::imaging::placeholder::PLACEHOLDER_FILL;
use shopmission::imaging::{
    placeholder, ImageSource, ReportComposer, ReportFont, ReportInput, ReportLayout, ReportRow,
    ThumbnailFetcher,
};
use shopmission::models::{Mission, Product};
use shopmission::reporting::{assemble_report, collect_report_input, write_report};
use shopmission::session::Session;
use std::sync::Arc;
use tempfile::TempDir;

const THUMB: u32 = 120;

/// Source that never has any picture.
struct OfflineSource;

#[async_trait]
impl ImageSource for OfflineSource {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, ShopError> {
        Err(ShopError::Network(format!("offline: {}", reference)))
    }
}

fn composer() -> ReportComposer {
    ReportComposer::new(ReportFont::Builtin, THUMB, 20)
}

fn row(name: &str, quantity: u32, unit_price: u64) -> ReportRow {
    ReportRow {
        name: name.to_string(),
        quantity,
        unit_price,
        line_total: unit_price * quantity as u64,
        thumbnail: Arc::new(placeholder(THUMB, THUMB)),
    }
}

fn input(rows: Vec<ReportRow>, reasons: &str, budget: u64) -> ReportInput {
    let spent = rows.iter().map(|r| r.line_total).sum();
    ReportInput {
        mission_title: "카레 만들기".to_string(),
        rows,
        reasons: reasons.to_string(),
        spent,
        budget,
    }
}

fn count(img: &image::RgbaImage, color: image::Rgba<u8>) -> usize {
    img.pixels().filter(|p| **p == color).count()
}

fn finished_session() -> Session {
    let mut session = Session::new();
    session.pick_mission(&Mission::new("카레 만들기", 15000, None)).unwrap();
    for (name, price, qty) in [("감자", 1500, 2), ("카레 가루", 3000, 1), ("돼지고기", 8000, 1)] {
        let product = Product {
            name: name.to_string(),
            price,
            image: format!("https://shop.invalid/{}.png", name),
        };
        session.add_item(&product, qty).unwrap();
    }
    session.submit().unwrap();
    session.set_reasons("감자는 필수\n돼지고기가 저렴").unwrap();
    session
}

#[test]
fn test_dimensions_follow_layout() {
    let composer = composer();
    let report = input(vec![row("potato", 2, 1500), row("curry", 1, 3000)], "cheap\ntasty", 15000);

    let img = composer.render(&report).unwrap();
    let layout = ReportLayout::measure(THUMB, 2, 2);
    assert_eq!(img.dimensions(), (layout.width, layout.height));
    assert_eq!(layout.width, 1060);

    let taller = composer.render(&input(
        vec![row("a", 1, 100), row("b", 1, 100), row("c", 1, 100)],
        "cheap\ntasty",
        15000,
    ))
    .unwrap();
    assert_eq!(taller.height() - img.height(), layout.row_height);
}

#[test]
fn test_balance_is_green_within_budget() {
    let img = composer()
        .render(&input(vec![row("potato", 2, 1500)], "ok", 15000))
        .unwrap();
    assert!(count(&img, BALANCE_OK) > 0);
    assert_eq!(count(&img, BALANCE_OVER), 0);
}

#[test]
fn test_balance_is_red_over_budget() {
    let img = composer()
        .render(&input(vec![row("beef", 2, 9000)], "too much", 15000))
        .unwrap();
    assert!(count(&img, BALANCE_OVER) > 0);
    assert_eq!(count(&img, BALANCE_OK), 0);
}

#[test]
fn test_reasoning_is_capped_at_twenty_lines() {
    let composer = composer();
    let twenty: Vec<String> = (1..=20).map(|i| format!("line {}", i)).collect();
    let thirty: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();

    let a = composer.render(&input(vec![row("x", 1, 100)], &twenty.join("\n"), 1000)).unwrap();
    let b = composer.render(&input(vec![row("x", 1, 100)], &thirty.join("\n"), 1000)).unwrap();
    assert_eq!(a.dimensions(), b.dimensions());
}

#[test]
fn test_empty_rows_are_rejected() {
    let err = composer().render(&input(vec![], "why", 1000)).unwrap_err();
    assert!(matches!(err, ShopError::Report(_)));
}

#[test]
fn test_compose_encodes_png() {
    let composer = composer();
    let report = input(vec![row("potato", 2, 1500)], "ok", 15000);
    let bytes = composer.compose(&report).unwrap();

    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    let decoded = image::load_from_memory(&bytes).unwrap();
    let layout = composer.layout(&report);
    assert_eq!((decoded.width(), decoded.height()), (layout.width, layout.height));
}

#[tokio::test]
async fn test_unreachable_pictures_become_placeholders() {
    let fetcher = ThumbnailFetcher::new(Arc::new(OfflineSource));
    let session = finished_session();

    let report = collect_report_input(&session, &fetcher, THUMB).await.unwrap();
    assert_eq!(report.rows.len(), 3);
    assert_eq!(report.spent, 14000);
    for row in &report.rows {
        assert_eq!(row.thumbnail.dimensions(), (THUMB, THUMB));
        assert_eq!(*row.thumbnail.get_pixel(0, 0), PLACEHOLDER_FILL);
    }
    // Rows follow the cart's name order
    let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["감자", "돼지고기", "카레 가루"]);
}

#[tokio::test]
async fn test_report_requires_reasoning() {
    let fetcher = ThumbnailFetcher::new(Arc::new(OfflineSource));
    let mut session = finished_session();
    session.set_reasons("   ").unwrap();

    let err = assemble_report(&session, &fetcher, &composer()).await.unwrap_err();
    assert!(matches!(err, ShopError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_report_written_under_mission_file_name() {
    let dir = TempDir::new().unwrap();
    let fetcher = ThumbnailFetcher::new(Arc::new(OfflineSource));
    let artifact = assemble_report(&finished_session(), &fetcher, &composer()).await.unwrap();
    assert_eq!(artifact.file_name, "카레 만들기_결과.png");

    let written = write_report(&artifact, &dir.path().join("results")).await.unwrap();
    assert_eq!(written, dir.path().join("results").join("카레 만들기_결과.png"));
    assert_eq!(std::fs::read(&written).unwrap(), artifact.bytes);

    let explicit = write_report(&artifact, &dir.path().join("out").join("mine.png")).await.unwrap();
    assert!(explicit.ends_with("out/mine.png"));
    assert!(explicit.exists());
}
