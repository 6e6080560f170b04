//! Dateas: CUIT/CUIL lookup tables
//!
//! `GET /es/consulta_cuit_cuil?name=&cuit={dni}`. Results come back as a
//! `table.data-table`, older layouts as `.result-row` blocks.

use url::Url;

use super::SiteProfile;
use crate::scraping::SiteRequest;
use crate::types::Category;

pub fn profile() -> SiteProfile {
    SiteProfile {
        key: "dateas",
        name: "Dateas",
        category: Category::Otros,
        default_base_url: "https://www.dateas.com",
        selectors: &["table.data-table tbody td", ".result-row .result-text"],
        max_items: 12,
        sort_by_length: true,
        build_request,
    }
}

fn build_request(base: &Url, dni: &str) -> Result<SiteRequest, url::ParseError> {
    let mut url = base.join("/es/consulta_cuit_cuil")?;
    url.query_pairs_mut()
        .append_pair("name", "")
        .append_pair("cuit", dni);
    Ok(SiteRequest::get(url).with_header("Referer", base.join("/")?.as_str()))
}
