//! Server-rendered product listing for browsers.

use axum_helpers::CurrentUser;
use maud::{DOCTYPE, Markup, html};

use crate::models::Product;
use crate::pagination::PageInfo;

fn format_price(price: f64) -> String {
    format!("$ {price:.2}")
}

fn product_card(product: &Product) -> Markup {
    html! {
        article.product data-id=(product.id.to_string()) {
            @if let Some(src) = product.thumbnails.first() {
                img src=(src) alt=(product.title);
            }
            h2 { (product.title) }
            @if !product.description.is_empty() {
                p.description { (product.description) }
            }
            p.price { (format_price(product.price)) }
            p.category { "Categoría: " (product.category) }
            @if product.in_stock() {
                p.stock { "Stock: " (product.stock) }
            } @else {
                p.stock.empty { "Sin stock" }
            }
        }
    }
}

/// Full listing page: greeting, product cards and prev/next navigation.
pub fn product_list_page(
    products: &[Product],
    user: Option<&CurrentUser>,
    page_info: &PageInfo,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Productos" }
            }
            body {
                header {
                    @match user {
                        Some(user) => p.welcome { "Bienvenido, " (user.email) " (" (user.role) ")" },
                        None => p.welcome { "Bienvenido, invitado" },
                    }
                }
                main {
                    h1 { "Productos" }
                    @if products.is_empty() {
                        p.empty { "No hay productos para mostrar" }
                    } @else {
                        section.products {
                            @for product in products {
                                (product_card(product))
                            }
                        }
                    }
                }
                nav.pagination {
                    @if let Some(link) = &page_info.prev_link {
                        a.prev href=(link) { "Anterior" }
                    }
                    span.current { "Página " (page_info.page) " de " (page_info.total_pages) }
                    @if let Some(link) = &page_info.next_link {
                        a.next href=(link) { "Siguiente" }
                    }
                }
            }
        }
    }
}
