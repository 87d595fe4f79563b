//! Server-side HTML rendering for the catalog pages.
//!
//! Pages are plain, self-contained documents meant as the no-JavaScript
//! fallback of the client-side listing. Every value that originates from the
//! database or the request is escaped before it is written.

use std::fmt::Write;

use axum::http::StatusCode;
use bloom_core::catalog::{CatalogParams, ProductPage};
use bloom_core::product::{Product, CATEGORIES};
use bloom_core::sorting::{SortDirection, SortField, SortOrder};

use crate::query::encode_params;
use crate::response::format_price;

/// URL prefix product images are served under.
pub const MEDIA_URL: &str = "/media/";

/// Sort options offered in the listing's sort selector.
const SORT_OPTIONS: &[(SortField, SortDirection, &str)] = &[
    (SortField::QuantitySold, SortDirection::Descending, "Популярные"),
    (SortField::Price, SortDirection::Ascending, "Сначала дешевле"),
    (SortField::Price, SortDirection::Descending, "Сначала дороже"),
    (SortField::CreatedAt, SortDirection::Descending, "Новинки"),
    (SortField::Name, SortDirection::Ascending, "По названию"),
];

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Detail page URL for a product.
pub fn product_url(product: &Product) -> String {
    format!("/product/{}/", product.id)
}

/// Listing URL for `page`, keeping the active filters and sort.
pub fn page_url(params: &CatalogParams, page: i64) -> String {
    format!("/?{}", encode_params(&params.active_filters().with_page(page)))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

fn image_tag(product: &Product) -> String {
    product
        .image_path()
        .map(|path| {
            format!(
                "<img src=\"{MEDIA_URL}{}\" alt=\"{}\">",
                escape(path),
                escape(&product.name)
            )
        })
        .unwrap_or_default()
}

/// Render the product listing page.
pub fn product_list_page(page: &ProductPage, params: &CatalogParams) -> String {
    let mut body = String::new();
    body.push_str("<h1>Каталог</h1>\n");
    body.push_str(&filter_form(params, page.sort));

    if page.products.is_empty() {
        body.push_str("<p class=\"empty\">Товары не найдены.</p>\n");
    } else {
        body.push_str("<ul class=\"products\">\n");
        for product in &page.products {
            let _ = write!(
                body,
                "<li class=\"product\">{image}<a href=\"{url}\">{name}</a> \
                 <span class=\"price\">{price}</span> \
                 <span class=\"category\">{category}</span> \
                 <span class=\"sold\">Продано: {sold}</span> \
                 <span class=\"status\">{status}</span></li>\n",
                image = image_tag(product),
                url = product_url(product),
                name = escape(&product.name),
                price = format_price(product),
                category = escape(product.category_display()),
                sold = product.quantity_sold,
                status = product.availability_status(),
            );
        }
        body.push_str("</ul>\n");
    }

    body.push_str(&pagination(page, params));
    layout("Каталог", &body)
}

fn filter_form(params: &CatalogParams, sort: SortOrder) -> String {
    let value = |v: &Option<String>| escape(v.as_deref().unwrap_or_default());
    let selected_category = params.category.as_deref().map(str::trim).unwrap_or_default();

    let mut form = String::from("<form method=\"get\" action=\"/\" class=\"filters\">\n");

    form.push_str("<select name=\"category\">\n<option value=\"\">Все категории</option>\n");
    for (code, label) in CATEGORIES {
        let selected = if *code == selected_category { " selected" } else { "" };
        let _ = writeln!(
            form,
            "<option value=\"{code}\"{selected}>{label}</option>",
            label = escape(label),
        );
    }
    form.push_str("</select>\n");

    let _ = writeln!(
        form,
        "<input type=\"text\" name=\"min_price\" value=\"{}\" placeholder=\"Цена от\">\n\
         <input type=\"text\" name=\"max_price\" value=\"{}\" placeholder=\"Цена до\">\n\
         <input type=\"text\" name=\"date_range\" value=\"{}\" placeholder=\"За последние N дней\">",
        value(&params.min_price),
        value(&params.max_price),
        value(&params.date_range),
    );

    form.push_str("<select name=\"sort_by\">\n");
    let mut listed = false;
    for (field, direction, label) in SORT_OPTIONS {
        let option = SortOrder {
            field: *field,
            direction: *direction,
        };
        let selected = if option == sort { " selected" } else { "" };
        listed |= option == sort;
        let _ = writeln!(form, "<option value=\"{option}\"{selected}>{label}</option>");
    }
    // Sorts reachable only by URL stay selected so resubmitting keeps them.
    if !listed {
        let _ = writeln!(form, "<option value=\"{sort}\" selected>{sort}</option>");
    }
    form.push_str("</select>\n<button type=\"submit\">Показать</button>\n</form>\n");
    form
}

fn pagination(page: &ProductPage, params: &CatalogParams) -> String {
    let info = &page.page;
    let mut nav = String::from("<nav class=\"pagination\">\n");

    if info.count > 0 {
        let _ = writeln!(
            nav,
            "<span class=\"range\">Товары {}–{} из {}</span>",
            info.start_index(),
            info.end_index(),
            info.count
        );
    }

    if let Some(prev) = info.previous_page_number() {
        let _ = writeln!(
            nav,
            "<a href=\"{}\" rel=\"prev\">&laquo; Назад</a>",
            escape(&page_url(params, prev))
        );
    }
    let _ = writeln!(
        nav,
        "<span class=\"current\">Страница {} из {}</span>",
        info.number, info.num_pages
    );
    if let Some(next) = info.next_page_number() {
        let _ = writeln!(
            nav,
            "<a href=\"{}\" rel=\"next\">Вперёд &raquo;</a>",
            escape(&page_url(params, next))
        );
    }

    nav.push_str("</nav>\n");
    nav
}

/// Render the product detail page.
pub fn product_detail_page(product: &Product) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>{}</h1>", escape(&product.name));
    body.push_str(&image_tag(product));
    let _ = write!(
        body,
        "\n<dl class=\"product-detail\">\n\
         <dt>Цена</dt><dd class=\"price\">{price}</dd>\n\
         <dt>Категория</dt><dd class=\"category\">{category}</dd>\n\
         <dt>Продано</dt><dd class=\"sold\">{sold}</dd>\n\
         <dt>В наличии</dt><dd class=\"available\">{available}</dd>\n\
         <dt>Статус</dt><dd class=\"status\">{status}</dd>\n\
         <dt>Дата добавления</dt><dd class=\"created\">{created}</dd>\n\
         </dl>\n",
        price = format_price(product),
        category = escape(product.category_display()),
        sold = product.quantity_sold,
        available = product.available_quantity,
        status = product.availability_status(),
        created = product.created_at.format("%d.%m.%Y"),
    );
    if !product.description.trim().is_empty() {
        let _ = writeln!(
            body,
            "<p class=\"description\">{}</p>",
            escape(&product.description)
        );
    }
    body.push_str("<p><a href=\"/\">&larr; К каталогу</a></p>\n");
    layout(&product.name, &body)
}

/// Render an error page for the given status.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{code} {title}</h1>\n<p>{message}</p>\n<p><a href=\"/\">&larr; К каталогу</a></p>\n",
        code = status.as_u16(),
        title = escape(title),
        message = escape(message),
    );
    layout(title, &body)
}
