//! Datuar: personal records by DNI
//!
//! The lookup form posts `dni` and `criterio` (both set to the DNI) to
//! `/pedido.php`. Matches render as `.f_gotham_book.text-dark.small`
//! blocks; document order is kept.

use url::Url;

use super::SiteProfile;
use crate::scraping::SiteRequest;
use crate::types::Category;

pub fn profile() -> SiteProfile {
    SiteProfile {
        key: "datuar",
        name: "Datuar",
        category: Category::Personal,
        default_base_url: "https://datuar.com",
        selectors: &[".f_gotham_book.text-dark.small"],
        max_items: 15,
        sort_by_length: false,
        build_request,
    }
}

fn build_request(base: &Url, dni: &str) -> Result<SiteRequest, url::ParseError> {
    let url = base.join("/pedido.php")?;
    let form = vec![
        ("dni".to_string(), dni.to_string()),
        ("criterio".to_string(), dni.to_string()),
    ];
    Ok(SiteRequest::post_form(url, form).with_header("Referer", base.join("/")?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::Method;

    #[test]
    fn test_request_posts_dni_twice() {
        let base = Url::parse("https://datuar.com").unwrap();
        let request = build_request(&base, "12345678").unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), "https://datuar.com/pedido.php");
        assert_eq!(
            request.form,
            vec![
                ("dni".to_string(), "12345678".to_string()),
                ("criterio".to_string(), "12345678".to_string()),
            ]
        );
        assert_eq!(
            request.headers,
            vec![("Referer".to_string(), "https://datuar.com/".to_string())]
        );
    }
}
