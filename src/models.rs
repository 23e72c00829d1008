use serde::Serialize;

/// Column layout shared by every category in a group.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaGroup {
    /// Ordinary uploads: rows carry the uploader and a danmaku count.
    Video,
    /// Licensed series and films: rows carry an update status and follower count.
    Film,
}

const VIDEO_HEADERS: [&str; 7] = ["排名", "标题", "链接", "UP", "UP链接", "播放量", "弹幕量"];
const FILM_HEADERS: [&str; 6] = ["排名", "标题", "链接", "更新状态", "播放量", "追番人数"];

impl SchemaGroup {
    pub const ALL: [SchemaGroup; 2] = [SchemaGroup::Video, SchemaGroup::Film];

    /// Header row written at the top of every sheet in this group
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            SchemaGroup::Video => &VIDEO_HEADERS,
            SchemaGroup::Film => &FILM_HEADERS,
        }
    }

    pub fn column_count(self) -> usize {
        self.headers().len()
    }

    /// Registry entries belonging to this group, in fetch order
    pub fn categories(self) -> impl Iterator<Item = &'static Category> {
        CATEGORIES.iter().filter(move |c| c.group == self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaGroup::Video => "video",
            SchemaGroup::Film => "film",
        }
    }
}

impl std::fmt::Display for SchemaGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranking page on the site
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    /// URL path segment appended to the ranking base URL
    pub key: &'static str,
    /// Display name, also used as the sheet name
    pub name: &'static str,
    pub group: SchemaGroup,
}

impl Category {
    const fn new(key: &'static str, name: &'static str, group: SchemaGroup) -> Self {
        Self { key, name, group }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url, self.key)
    }
}

pub const DEFAULT_BASE_URL: &str = "https://www.bilibili.com/v/popular/rank/";

pub static CATEGORIES: &[Category] = &[
    Category::new("all", "全部", SchemaGroup::Video),
    Category::new("douga", "动画", SchemaGroup::Video),
    Category::new("game", "游戏", SchemaGroup::Video),
    Category::new("kichiku", "鬼畜", SchemaGroup::Video),
    Category::new("music", "音乐", SchemaGroup::Video),
    Category::new("dance", "舞蹈", SchemaGroup::Video),
    Category::new("cinephile", "影视", SchemaGroup::Video),
    Category::new("ent", "娱乐", SchemaGroup::Video),
    Category::new("knowledge", "知识", SchemaGroup::Video),
    Category::new("tech", "科技数码", SchemaGroup::Video),
    Category::new("food", "美食", SchemaGroup::Video),
    Category::new("car", "汽车", SchemaGroup::Video),
    Category::new("fashion", "时尚美妆", SchemaGroup::Video),
    Category::new("sports", "体育运动", SchemaGroup::Video),
    Category::new("animal", "动物", SchemaGroup::Video),
    Category::new("anime", "番剧", SchemaGroup::Film),
    Category::new("guochuang", "国创", SchemaGroup::Film),
    Category::new("documentary", "纪录片", SchemaGroup::Film),
    Category::new("movie", "电影", SchemaGroup::Film),
    Category::new("tv", "电视剧", SchemaGroup::Film),
    Category::new("variety", "综艺", SchemaGroup::Film),
];

pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct VideoRow {
    pub rank: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub uploader: String,
    pub uploader_link: Option<String>,
    pub views: String,
    pub danmaku: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
pub struct FilmRow {
    pub rank: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub update_status: String,
    pub views: String,
    pub followers: String,
}

/// One ranking entry, shaped by its category's group
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub enum RankRow {
    Video(VideoRow),
    Film(FilmRow),
}

impl RankRow {
    pub fn group(&self) -> SchemaGroup {
        match self {
            RankRow::Video(_) => SchemaGroup::Video,
            RankRow::Film(_) => SchemaGroup::Film,
        }
    }

    /// Cells in header order; `None` marks a field the page omitted.
    pub fn cells(&self) -> Vec<Option<&str>> {
        match self {
            RankRow::Video(r) => vec![
                r.rank.as_deref(),
                r.title.as_deref(),
                r.link.as_deref(),
                Some(r.uploader.as_str()),
                r.uploader_link.as_deref(),
                Some(r.views.as_str()),
                Some(r.danmaku.as_str()),
            ],
            RankRow::Film(r) => vec![
                r.rank.as_deref(),
                r.title.as_deref(),
                r.link.as_deref(),
                Some(r.update_status.as_str()),
                Some(r.views.as_str()),
                Some(r.followers.as_str()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_keys_are_unique() {
        let keys: HashSet<_> = CATEGORIES.iter().map(|c| c.key).collect();
        assert_eq!(keys.len(), CATEGORIES.len());
    }

    #[test]
    fn groups_partition_registry() {
        assert_eq!(SchemaGroup::Video.categories().count(), 15);
        assert_eq!(SchemaGroup::Film.categories().count(), 6);
        assert_eq!(find_category("anime").map(|c| c.group), Some(SchemaGroup::Film));
        assert!(find_category("nope").is_none());
    }

    #[test]
    fn cells_match_header_width() {
        let video = RankRow::Video(VideoRow::default());
        let film = RankRow::Film(FilmRow::default());
        assert_eq!(video.cells().len(), SchemaGroup::Video.column_count());
        assert_eq!(film.cells().len(), SchemaGroup::Film.column_count());
    }

    #[test]
    fn category_url_appends_key() {
        let cat = find_category("douga").unwrap();
        assert_eq!(
            cat.url(DEFAULT_BASE_URL),
            "https://www.bilibili.com/v/popular/rank/douga"
        );
    }
}
