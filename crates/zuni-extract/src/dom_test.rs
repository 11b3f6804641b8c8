use reqwest::Url;
use rust_decimal::Decimal;

use super::*;
use crate::price::PricePair;

fn page(body: &str) -> Page {
    Page::parse(
        format!("<html><head></head><body>{body}</body></html>"),
        Url::parse("https://produto.mercadolivre.com.br/MLB-123-fone").unwrap(),
    )
}

fn page_with_head(head: &str, body: &str) -> Page {
    Page::parse(
        format!("<html><head>{head}</head><body>{body}</body></html>"),
        Url::parse("https://produto.mercadolivre.com.br/MLB-123-fone").unwrap(),
    )
}

fn money(fraction: &str, cents: Option<&str>) -> String {
    let cents = cents
        .map(|c| format!(r#"<span class="andes-money-amount__cents">{c}</span>"#))
        .unwrap_or_default();
    format!(
        r#"<span class="andes-money-amount__fraction">{fraction}</span>{cents}"#
    )
}

// ---------------------------------------------------------------------------
// title / description / breadcrumb
// ---------------------------------------------------------------------------

#[test]
fn title_prefers_heading() {
    let page = page_with_head(
        r#"<meta property="og:title" content="OG Title">"#,
        "<h1> Fone  Bluetooth </h1>",
    );
    assert_eq!(title(&page).as_deref(), Some("Fone Bluetooth"));
}

#[test]
fn title_falls_back_to_social_preview() {
    let page = page_with_head(
        r#"<meta property="og:title" content="Fone  Bluetooth JBL">"#,
        "<h1>   </h1>",
    );
    assert_eq!(title(&page).as_deref(), Some("Fone Bluetooth JBL"));
}

#[test]
fn description_uses_most_specific_container() {
    let page = page(
        r#"<div class="ui-pdp-description__content">generic</div>
           <p data-testid="content" class="ui-pdp-description__content">Bateria de 30h.</p>"#,
    );
    assert_eq!(description(&page).as_deref(), Some("Bateria de 30h."));
}

#[test]
fn description_falls_back_to_class_only() {
    let page = page(r#"<div class="ui-pdp-description__content"> Som  limpo </div>"#);
    assert_eq!(description(&page).as_deref(), Some("Som limpo"));
    assert_eq!(description(&self::page("<p>nada</p>")), None);
}

#[test]
fn breadcrumb_prefers_list_inside_nav() {
    let page = page(
        r"<ol><li>Passo 1</li></ol>
          <nav><ol><li> Eletrônicos </li><li></li><li>Fones de Ouvido</li></ol></nav>",
    );
    assert_eq!(breadcrumb(&page), vec!["Eletrônicos", "Fones de Ouvido"]);
}

#[test]
fn breadcrumb_falls_back_to_first_list() {
    let page = page("<ol><li>Casa</li><li>Cozinha</li></ol>");
    assert_eq!(breadcrumb(&page), vec!["Casa", "Cozinha"]);
    assert!(breadcrumb(&self::page("<p>sem lista</p>")).is_empty());
}

// ---------------------------------------------------------------------------
// gallery
// ---------------------------------------------------------------------------

#[test]
fn gallery_figures_use_lazy_attributes_and_srcset() {
    let page = page(
        r#"<div class="ui-pdp-gallery">
            <figure class="ui-pdp-gallery__figure"><img src="https://http2.mlstatic.com/D_1-O.webp?v=1"></figure>
            <figure class="ui-pdp-gallery__figure"><img src="data:image/gif;base64,R0l" data-src="https://http2.mlstatic.com/D_2-O.webp"></figure>
            <figure class="ui-pdp-gallery__figure"><img srcset="https://http2.mlstatic.com/D_3-O.webp 1x, https://http2.mlstatic.com/D_3-2x.webp 2x"></figure>
            <figure class="ui-pdp-gallery__figure"><img src="https://http2.mlstatic.com/D_1-O.webp?v=2"></figure>
        </div>"#,
    );
    assert_eq!(
        gallery_images(&page, &ExtractionLimits::FETCHED),
        vec![
            "https://http2.mlstatic.com/D_1-O.webp?v=1",
            "https://http2.mlstatic.com/D_2-O.webp",
            "https://http2.mlstatic.com/D_3-O.webp",
        ]
    );
}

#[test]
fn gallery_container_is_second_tier() {
    let page = page(
        r#"<div class="ui-pdp-gallery"><img src="/fotos/1.jpg"><img data-lazy="/fotos/2.jpg"></div>"#,
    );
    assert_eq!(
        gallery_images(&page, &ExtractionLimits::FETCHED),
        vec![
            "https://produto.mercadolivre.com.br/fotos/1.jpg",
            "https://produto.mercadolivre.com.br/fotos/2.jpg",
        ]
    );
}

#[test]
fn page_images_are_filtered_to_marketplace_hosts() {
    let page = page(
        r#"<img src="https://cdn.example.com/banner.png">
           <img src="https://http2.mlstatic.com/D_9-O.jpg">
           <img src="https://http2.mlstatic.com/D_9-O.jpg?x=1">"#,
    );
    assert_eq!(
        gallery_images(&page, &ExtractionLimits::FETCHED),
        vec!["https://http2.mlstatic.com/D_9-O.jpg"]
    );
}

#[test]
fn gallery_is_capped_per_profile() {
    let figures: String = (0..40)
        .map(|i| {
            format!(
                r#"<figure class="ui-pdp-gallery__figure"><img src="https://http2.mlstatic.com/D_{i}.jpg"></figure>"#
            )
        })
        .collect();
    let page = page(&figures);
    assert_eq!(gallery_images(&page, &ExtractionLimits::FETCHED).len(), 30);
    assert_eq!(gallery_images(&page, &ExtractionLimits::RENDERED).len(), 12);
}

// ---------------------------------------------------------------------------
// price widgets
// ---------------------------------------------------------------------------

#[test]
fn composite_amount_strips_grouping_and_pads_cents() {
    let page = page(&format!(
        r#"<span class="a">{}</span><span class="b">{}</span><span class="c">{}</span>"#,
        money("1.299", Some("9")),
        money("45", None),
        money("45", Some("abc")),
    ));
    let amount = |css: &str| {
        let selector = Selector::parse(css).unwrap();
        composite_amount(page.select_first(&selector).unwrap())
    };
    assert_eq!(amount(".a"), Some(Decimal::new(129_909, 2)));
    assert_eq!(amount(".b"), Some(Decimal::new(45, 0)));
    assert_eq!(amount(".c"), Some(Decimal::new(45, 0)));
}

#[test]
fn original_and_meta_price_give_both() {
    let page = page(&format!(
        r#"<s class="andes-money-amount andes-money-amount--previous">{}</s>
           <meta itemprop="price" content="70.00">"#,
        money("100", Some("00"))
    ));
    assert_eq!(
        price_widgets(&page),
        Some(PricePair {
            price: Some(Decimal::new(100, 0)),
            promo_price: Some(Decimal::new(70, 0)),
        })
    );
}

#[test]
fn original_falls_back_to_aria_label() {
    let page = page(&format!(
        r#"<s class="ui-pdp-price__original-value" aria-label="Antes: 120 reais com 5 centavos"></s>
           <div class="ui-pdp-price__second-line"><span class="andes-money-amount">{}</span></div>"#,
        money("99", Some("90"))
    ));
    assert_eq!(
        price_widgets(&page),
        Some(PricePair {
            price: Some(Decimal::new(12005, 2)),
            promo_price: Some(Decimal::new(9990, 2)),
        })
    );
}

#[test]
fn aria_label_plain_number() {
    let page = page(r#"<s class="ui-pdp-price__original-value" aria-label="Preço anterior: 150"></s>"#);
    assert_eq!(price_widgets(&page), Some(PricePair::regular(Decimal::new(150, 0))));
}

#[test]
fn lone_current_price_is_regular_price() {
    let page = page(&format!(
        r#"<div itemprop="offers"><span class="andes-money-amount">{}</span></div>"#,
        money("89", Some("90"))
    ));
    assert_eq!(
        price_widgets(&page),
        Some(PricePair::regular(Decimal::new(8990, 2)))
    );
}

#[test]
fn current_not_below_original_falls_back_to_text_scan() {
    let page = page(&format!(
        r#"<s class="andes-money-amount--previous">{}</s><meta itemprop="price" content="100.00">
           <p>de R$ 150,00 por R$ 100,00</p>"#,
        money("100", None)
    ));
    assert_eq!(price_widgets(&page), None);
    assert_eq!(
        dom_prices(&page, &ExtractionLimits::FETCHED),
        PricePair {
            price: Some(Decimal::new(150, 0)),
            promo_price: Some(Decimal::new(100, 0)),
        }
    );
}

#[test]
fn no_widgets_falls_back_to_text_scan() {
    let page = page("<p>de R$ 120,00 por R$ 89,90</p>");
    assert_eq!(price_widgets(&page), None);
    assert_eq!(
        dom_prices(&page, &ExtractionLimits::RENDERED),
        PricePair {
            price: Some(Decimal::new(120, 0)),
            promo_price: Some(Decimal::new(8990, 2)),
        }
    );
}

// ---------------------------------------------------------------------------
// strategy
// ---------------------------------------------------------------------------

#[test]
fn extract_reads_full_product_page() {
    let page = page(&format!(
        r#"<nav><ol><li>Eletrônicos</li><li>Fones</li></ol></nav>
           <h1>Fone Bluetooth</h1>
           <div class="ui-pdp-gallery"><figure class="ui-pdp-gallery__figure"><img src="https://http2.mlstatic.com/D_1.jpg"></figure></div>
           <s class="andes-money-amount--previous">{}</s>
           <div class="ui-pdp-price__second-line"><span class="andes-money-amount">{}</span></div>
           <p class="ui-review-capability__rating__label">1.204 avaliações</p>"#,
        money("199", Some("90")),
        money("149", Some("90")),
    ));
    let draft = extract(&page, &ExtractionLimits::FETCHED).unwrap();
    assert_eq!(draft.method, ExtractionMethod::Dom);
    assert_eq!(draft.title.as_deref(), Some("Fone Bluetooth"));
    assert_eq!(draft.category_path, vec!["Eletrônicos", "Fones"]);
    assert_eq!(draft.category_name.as_deref(), Some("Fones"));
    assert_eq!(draft.images, vec!["https://http2.mlstatic.com/D_1.jpg"]);
    assert_eq!(draft.price, Some(Decimal::new(19990, 2)));
    assert_eq!(draft.promo_price, Some(Decimal::new(14990, 2)));
    assert_eq!(draft.reviews_count, Some(1_204));
    assert_eq!(draft.rating, None);
}

#[test]
fn extract_keeps_priceless_draft_with_title() {
    let page = page("<h1>Produto sem preço</h1>");
    let draft = extract(&page, &ExtractionLimits::FETCHED).unwrap();
    assert_eq!(draft.title.as_deref(), Some("Produto sem preço"));
    assert_eq!(draft.price, None);
}

#[test]
fn extract_returns_none_for_empty_page() {
    assert!(extract(&page("<div></div>"), &ExtractionLimits::FETCHED).is_none());
}
