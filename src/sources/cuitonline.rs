//! CuitOnline: fiscal registry (CUIT/CUIL) search
//!
//! `GET /search.php?q={dni}`. Each hit carries a name line and a facet line
//! with the tax id and activity. Longest fragments first, capped at 10.

use url::Url;

use super::SiteProfile;
use crate::scraping::SiteRequest;
use crate::types::Category;

pub fn profile() -> SiteProfile {
    SiteProfile {
        key: "cuitonline",
        name: "CuitOnline",
        category: Category::Fiscal,
        default_base_url: "https://www.cuitonline.com",
        selectors: &[".hit .denominacion", ".hit .doc-facets"],
        max_items: 10,
        sort_by_length: true,
        build_request,
    }
}

fn build_request(base: &Url, dni: &str) -> Result<SiteRequest, url::ParseError> {
    let mut url = base.join("/search.php")?;
    url.query_pairs_mut().append_pair("q", dni);
    Ok(SiteRequest::get(url).with_header("Referer", base.join("/")?.as_str()))
}
