use crate::catalog::Catalog;
use crate::config::ShopConfig;
use crate::errors::ShopError;
use crate::utils::formatting::format_won;
use tracing::warn;

pub async fn handle_validate(config: ShopConfig) -> Result<(), ShopError> {
    let path = config.catalog_path();
    let catalog = Catalog::load(&path)?;

    let zero_priced = catalog.products().iter().filter(|p| p.price == 0).count();
    if zero_priced > 0 {
        warn!(count = zero_priced, "Products with a zero or unreadable price");
    }
    let missing_images = catalog.products().iter().filter(|p| p.image.trim().is_empty()).count();
    if missing_images > 0 {
        warn!(count = missing_images, "Products without an image reference");
    }

    println!("Catalog is valid: {} ({} products)", path.display(), catalog.len());
    for mission in config.missions() {
        let affordable = catalog.products().iter().any(|p| p.price > 0 && p.price <= mission.budget);
        if !affordable {
            warn!(mission = %mission.title, "No product fits within this mission's budget");
        }
        println!("  mission: {} (budget {})", mission.title, format_won(mission.budget));
    }
    Ok(())
}
