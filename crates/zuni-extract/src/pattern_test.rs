use reqwest::Url;
use rust_decimal::Decimal;

use super::*;

fn page(body: &str) -> Page {
    Page::parse(
        format!("<html><body>{body}</body></html>"),
        Url::parse("https://produto.mercadolivre.com.br/MLB-1").unwrap(),
    )
}

#[test]
fn de_por_text_yields_price_and_promo() {
    let draft = extract(
        &page("<p>de R$ 120,00 por R$ 89,90</p>"),
        &ExtractionLimits::RENDERED,
    )
    .unwrap();
    assert_eq!(draft.price, Some(Decimal::new(12000, 2)));
    assert_eq!(draft.promo_price, Some(Decimal::new(8990, 2)));
    assert_eq!(draft.method, ExtractionMethod::Pattern);
}

#[test]
fn two_unmarked_amounts_yield_larger_price() {
    let draft = extract(
        &page("<p>R$ 50,00</p><p>R$ 30,00</p>"),
        &ExtractionLimits::FETCHED,
    )
    .unwrap();
    assert_eq!(draft.price, Some(Decimal::new(50, 0)));
    assert_eq!(draft.promo_price, Some(Decimal::new(30, 0)));
}

#[test]
fn single_amount_has_no_promo() {
    let draft = extract(&page("<span>R$ 19,90</span>"), &ExtractionLimits::RENDERED).unwrap();
    assert_eq!(draft.price, Some(Decimal::new(1990, 2)));
    assert_eq!(draft.promo_price, None);
}

#[test]
fn pattern_draft_never_carries_other_fields() {
    let draft = extract(
        &page(r#"<h1>Fone</h1><img src="https://http2.mlstatic.com/a.jpg"><p>R$ 19,90</p>"#),
        &ExtractionLimits::RENDERED,
    )
    .unwrap();
    assert!(draft.title.is_none());
    assert!(draft.images.is_empty());
    assert!(draft.category_path.is_empty());
    assert!(draft.reviews_count.is_none());
}

#[test]
fn no_currency_tokens_returns_none() {
    assert!(extract(&page("<p>sem preço</p>"), &ExtractionLimits::RENDERED).is_none());
}

#[test]
fn marker_is_case_insensitive_and_word_bound() {
    let tokens = scan_price_tokens("De R$ 10,00 unidade R$ 5,00", 10);
    assert_eq!(tokens.len(), 2);
    assert!(tokens[0].is_previous);
    assert!(!tokens[1].is_previous);
}

#[test]
fn token_limit_is_respected() {
    let text = (1..=20)
        .map(|i| format!("R$ {i},00"))
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(scan_price_tokens(&text, 6).len(), 6);
    assert_eq!(scan_price_tokens(&text, 10).len(), 10);
}

#[test]
fn tokens_past_the_text_window_are_ignored() {
    let filler = "x".repeat(13_000);
    let page = page(&format!("<p>{filler} R$ 19,90</p>"));
    assert!(extract(&page, &ExtractionLimits::RENDERED).is_none());
    assert!(extract(&page, &ExtractionLimits::FETCHED).is_some());
}

#[test]
fn zero_amount_tokens_do_not_count() {
    let tokens = scan_price_tokens("R$ 0,00 R$ 15,00", 1);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].amount, Decimal::new(15, 0));
}
