use super::*;

fn page(html: &str) -> Page {
    Page::parse(
        html,
        Url::parse("https://produto.mercadolivre.com.br/MLB-123-fone").unwrap(),
    )
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

#[test]
fn rendered_text_skips_scripts_and_styles() {
    let page = page(
        r#"<html><head><title>ignored</title></head><body>
            <script>var price = "R$ 1,00";</script>
            <style>.x { color: red }</style>
            <p>Fone   Bluetooth</p>
            <noscript>enable js</noscript>
        </body></html>"#,
    );
    assert_eq!(page.rendered_text(), "Fone Bluetooth");
}

#[test]
fn rendered_text_breaks_lines_at_blocks_and_joins_inline() {
    let page = page(
        r#"<body><div>de <s>R$ <span>120</span>,00</s></div><div>por R$ 89,90</div></body>"#,
    );
    assert_eq!(page.rendered_text(), "de R$ 120,00\npor R$ 89,90");
}

#[test]
fn text_window_counts_characters_not_bytes() {
    let page = page("<body><p>ação ótima</p></body>");
    assert_eq!(page.text_window(4), "ação");
    assert_eq!(page.text_window(1000), "ação ótima");
}

#[test]
fn node_text_collapses_whitespace() {
    let page = page("<body><h1>\n  Fone \t de   Ouvido \n</h1></body>");
    let h1 = page.select_first(&selector("h1")).unwrap();
    assert_eq!(h1.text(), "Fone de Ouvido");
    assert_eq!(h1.tag_name(), "h1");
}

#[test]
fn node_scoped_queries_stay_inside_the_node() {
    let page = page(
        r#"<body>
            <nav><ol><li>Eletrônicos</li><li>Fones</li></ol></nav>
            <ol><li>outside</li></ol>
        </body>"#,
    );
    let nav = page.select_first(&selector("nav")).unwrap();
    let items: Vec<String> = nav.select_all(&selector("li")).map(|n| n.text()).collect();
    assert_eq!(items, vec!["Eletrônicos", "Fones"]);
    assert_eq!(page.select_all(&selector("li")).count(), 3);
}

#[test]
fn attributes_and_blank_attributes() {
    let page = page(r#"<body><img src="  " data-src="/img/a.jpg"></body>"#);
    let img = page.select_first(&selector("img")).unwrap();
    assert_eq!(img.attr("src"), Some("  "));
    assert_eq!(img.non_blank_attr("src"), None);
    assert_eq!(img.non_blank_attr("data-src"), Some("/img/a.jpg"));
    assert_eq!(img.attr("missing"), None);
}

#[test]
fn resolve_url_handles_relative_and_rejects_data() {
    let page = page("<body></body>");
    assert_eq!(
        page.resolve_url("/img/a.jpg").as_deref(),
        Some("https://produto.mercadolivre.com.br/img/a.jpg")
    );
    assert_eq!(
        page.resolve_url("//http2.mlstatic.com/D_1.jpg").as_deref(),
        Some("https://http2.mlstatic.com/D_1.jpg")
    );
    assert_eq!(page.resolve_url("data:image/gif;base64,R0lGOD"), None);
    assert_eq!(page.resolve_url("javascript:void(0)"), None);
    assert_eq!(page.resolve_url(""), None);
}

#[test]
fn blank_page_detection() {
    assert!(page("   \n").is_blank());
    assert!(!page("<html><body>x</body></html>").is_blank());
}
