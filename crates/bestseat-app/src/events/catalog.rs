use bestseat_types::{AppEvent, CatalogKind};

use crate::context::AppContext;

pub async fn handle_list_catalog(ctx: &AppContext, kind: CatalogKind) -> anyhow::Result<()> {
    let catalog = &ctx.state.catalog;
    let entries = match kind {
        CatalogKind::Teams => catalog
            .teams()
            .iter()
            .map(|team| format!("{} ({})", team.name, team.abbr))
            .collect(),
        CatalogKind::Venues => catalog.stadiums().to_vec(),
    };

    ctx.send(AppEvent::ShowCatalog { kind, entries }).await
}
