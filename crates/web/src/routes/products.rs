//! Product listing and creation routes.
//!
//! Both routes require a logged-in user and operate only on that user's
//! products.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use stockroom_core::FlashLevel;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{PageContext, RequireAuth, push_flash};
use crate::models::Product;
use crate::services::products::{ProductError, ProductForm, ProductService};
use crate::state::AppState;

/// Display-ready product row.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub name: String,
    pub price: String,
    pub quantity: i64,
    pub reference: String,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            name: product.name,
            price: product.price.to_string(),
            quantity: product.quantity.as_i64(),
            reference: product.reference.unwrap_or_default(),
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub ctx: PageContext,
    pub products: Vec<ProductView>,
}

/// Add product form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/add.html")]
pub struct AddProductTemplate {
    pub ctx: PageContext,
    pub form: ProductForm,
}

/// Display the current user's products sorted by name.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ctx: PageContext,
) -> Result<ProductsIndexTemplate> {
    let products = ProductService::new(state.pool())
        .list_products(user.id)
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(ProductsIndexTemplate { ctx, products })
}

/// Display the add product form.
pub async fn add_page(RequireAuth(_user): RequireAuth, ctx: PageContext) -> AddProductTemplate {
    AddProductTemplate {
        ctx,
        form: ProductForm::default(),
    }
}

/// Handle add product form submission.
#[tracing::instrument(skip_all, fields(user_id = %user.id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    ctx: PageContext,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    match ProductService::new(state.pool())
        .add_product(user.id, &form)
        .await
    {
        Ok(_) => {
            push_flash(
                &session,
                FlashLevel::Success,
                format!("Product '{}' added.", form.name.trim()),
            )
            .await?;
            Ok(Redirect::to("/products").into_response())
        }
        Err(e) => {
            let Some(message) = e.user_message() else {
                return Err(AppError::Product(e));
            };
            tracing::info!(error = %e, "Product rejected");

            let status = match e {
                ProductError::DuplicateReference(_) => StatusCode::CONFLICT,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            let page = AddProductTemplate {
                ctx: ctx.with_flash(FlashLevel::Danger, message),
                form,
            };
            Ok((status, page).into_response())
        }
    }
}
