//! Landing page.

use askama::Template;
use askama_web::WebTemplate;

use crate::filters;
use crate::middleware::PageContext;

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub ctx: PageContext,
}

/// Display the landing page.
pub async fn home(ctx: PageContext) -> HomeTemplate {
    HomeTemplate { ctx }
}
