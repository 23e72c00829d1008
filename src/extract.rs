//! Rank row extraction from a rendered ranking page.

use crate::models::{FilmRow, RankRow, SchemaGroup, VideoRow};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Selector for one ranking entry; also what the fetcher waits for.
pub const RANK_ITEM: &str = ".rank-item";

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static RANK_ITEM_SEL: LazyLock<Selector> = LazyLock::new(|| selector(RANK_ITEM));
static INFO_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".info"));
static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".title"));
static DETAIL_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".detail"));
static STATE_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".detail-state"));
static DATA_BOX_SEL: LazyLock<Selector> = LazyLock::new(|| selector(".data-box"));
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static SPAN_SEL: LazyLock<Selector> = LazyLock::new(|| selector("span"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("row {row}: no element matches '{selector}'")]
    MissingElement { row: usize, selector: &'static str },

    #[error("row {row}: expected 2 data boxes, found {found}")]
    MissingMetric { row: usize, found: usize },

    #[error("page url '{url}' is not absolute: {source}")]
    PageUrl { url: String, source: url::ParseError },
}

type Extractor = fn(&RowFrame<'_>) -> Result<RankRow, ExtractError>;

impl SchemaGroup {
    fn extractor(self) -> Extractor {
        match self {
            SchemaGroup::Video => extract_video,
            SchemaGroup::Film => extract_film,
        }
    }
}

/// Extract every `.rank-item` on the page loaded from `page_url`.
/// Links are resolved against `page_url`. The first malformed row aborts the page.
pub fn extract_rows(html: &str, page_url: &str, group: SchemaGroup) -> Result<Vec<RankRow>, ExtractError> {
    let base = Url::parse(page_url).map_err(|source| ExtractError::PageUrl {
        url: page_url.to_string(),
        source,
    })?;
    let document = Html::parse_document(html);
    let extract = group.extractor();

    document
        .select(&RANK_ITEM_SEL)
        .enumerate()
        .map(|(row, element)| RowFrame::read(row, element, &base).and_then(|frame| extract(&frame)))
        .collect()
}

/// The parts of a rank item both groups share.
struct RowFrame<'a> {
    row: usize,
    base: &'a Url,
    rank: Option<String>,
    title: Option<String>,
    link: Option<String>,
    detail: ElementRef<'a>,
    metrics: [String; 2],
}

impl<'a> RowFrame<'a> {
    fn read(row: usize, item: ElementRef<'a>, base: &'a Url) -> Result<Self, ExtractError> {
        let rank = attr(item, "data-rank");

        let info = first(item, &INFO_SEL, row, ".info")?;
        let title_elem = first(info, &TITLE_SEL, row, ".title")?;
        let detail = first(info, &DETAIL_SEL, row, ".detail")?;
        let state = first(detail, &STATE_SEL, row, ".detail-state")?;

        let boxes: Vec<String> = state.select(&DATA_BOX_SEL).map(text).collect();
        if boxes.len() < 2 {
            return Err(ExtractError::MissingMetric { row, found: boxes.len() });
        }
        let metrics = [boxes[0].clone(), boxes[1].clone()];

        Ok(Self {
            row,
            base,
            rank,
            title: attr(title_elem, "title"),
            link: attr(title_elem, "href").map(|h| resolve_href(base, &h)),
            detail,
            metrics,
        })
    }
}

fn extract_video(frame: &RowFrame<'_>) -> Result<RankRow, ExtractError> {
    let up = first(frame.detail, &ANCHOR_SEL, frame.row, "a")?;
    let [views, danmaku] = frame.metrics.clone();

    Ok(RankRow::Video(VideoRow {
        rank: frame.rank.clone(),
        title: frame.title.clone(),
        link: frame.link.clone(),
        uploader: text(up),
        uploader_link: attr(up, "href").map(|h| resolve_href(frame.base, &h)),
        views,
        danmaku,
    }))
}

fn extract_film(frame: &RowFrame<'_>) -> Result<RankRow, ExtractError> {
    let update = first(frame.detail, &SPAN_SEL, frame.row, "span")?;
    let [views, followers] = frame.metrics.clone();

    Ok(RankRow::Film(FilmRow {
        rank: frame.rank.clone(),
        title: frame.title.clone(),
        link: frame.link.clone(),
        update_status: text(update),
        views,
        followers,
    }))
}

fn first<'a>(
    scope: ElementRef<'a>,
    sel: &Selector,
    row: usize,
    name: &'static str,
) -> Result<ElementRef<'a>, ExtractError> {
    scope
        .select(sel)
        .next()
        .ok_or(ExtractError::MissingElement { row, selector: name })
}

fn attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(|s| s.to_string())
}

/// Rendered text: whitespace runs collapsed, ends trimmed
fn text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an `href` against the page it came from, as the DOM `href` property does.
/// An href that cannot be joined is kept verbatim.
pub fn resolve_href(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.bilibili.com/v/popular/rank/all";

    fn page() -> Url {
        Url::parse(PAGE).unwrap()
    }

    #[test]
    fn resolve_href_handles_absolute_forms() {
        let base = page();
        assert_eq!(
            resolve_href(&base, "//www.bilibili.com/video/BV1"),
            "https://www.bilibili.com/video/BV1"
        );
        assert_eq!(resolve_href(&base, "/bangumi/play/ss1"), "https://www.bilibili.com/bangumi/play/ss1");
        assert_eq!(resolve_href(&base, "http://x.com/a"), "http://x.com/a");
        assert_eq!(resolve_href(&base, "javascript:;"), "javascript:;");
    }

    #[test]
    fn resolve_href_handles_document_relative_forms() {
        let base = page();
        assert_eq!(
            resolve_href(&base, "video/BV1xx"),
            "https://www.bilibili.com/v/popular/rank/video/BV1xx"
        );
        assert_eq!(resolve_href(&base, "?p=2"), "https://www.bilibili.com/v/popular/rank/all?p=2");
        assert_eq!(resolve_href(&base, "../hot"), "https://www.bilibili.com/v/popular/hot");
    }

    #[test]
    fn links_follow_the_configured_page() {
        let html = r#"<div class="rank-item" data-rank="1"><div class="info">
            <a class="title" title="t" href="video/BV1xx">t</a>
            <div class="detail"><a href="?p=2">up</a><div class="detail-state">
            <span class="data-box">1</span><span class="data-box">2</span></div></div></div></div>"#;

        let rows = extract_rows(html, "https://mirror.example/rank/all", SchemaGroup::Video).unwrap();
        let RankRow::Video(row) = &rows[0] else { panic!("expected a video row") };
        assert_eq!(row.link.as_deref(), Some("https://mirror.example/rank/video/BV1xx"));
        assert_eq!(row.uploader_link.as_deref(), Some("https://mirror.example/rank/all?p=2"));
    }

    #[test]
    fn relative_page_url_is_rejected() {
        let err = extract_rows("<html></html>", "rank/all", SchemaGroup::Video).unwrap_err();
        assert!(matches!(err, ExtractError::PageUrl { .. }));
    }

    #[test]
    fn text_collapses_whitespace() {
        let doc = Html::parse_fragment("<span>  1000万 \n\t 播放 </span>");
        let span = doc.select(&SPAN_SEL).next().unwrap();
        assert_eq!(text(span), "1000万 播放");
    }

    #[test]
    fn page_without_rows_is_empty() {
        let rows = extract_rows("<html><body><p>loading</p></body></html>", PAGE, SchemaGroup::Video).unwrap();
        assert!(rows.is_empty());
    }
}
