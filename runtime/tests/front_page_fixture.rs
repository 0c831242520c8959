use assert_json_diff::assert_json_include;
use hn_front::extraction::parse_front_page;
use hn_front::FrontPage;
use serde_json::json;
use url::Url;

const FRONT_PAGE: &str = include_str!("fixtures/front_page.html");

fn base() -> Url {
    Url::parse("https://news.ycombinator.com/").unwrap()
}

#[test]
fn test_fixture_top_five() {
    let (total, stories) = parse_front_page(FRONT_PAGE, 5, &base()).unwrap();

    assert_eq!(total, 10);
    assert_eq!(stories.len(), 5);
    assert_eq!(
        stories.iter().map(|s| s.rank).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(stories[0].title, "Show HN: A tiny SQLite clone in 500 lines");
    assert_eq!(
        stories[0].link.as_deref(),
        Some("https://github.com/example/tinysql")
    );
    // Self posts link relative to the site and are left as written.
    assert_eq!(stories[2].link.as_deref(), Some("item?id=41000003"));
    assert_eq!(stories[3].item_id, Some(41000004));
}

#[test]
fn test_fixture_row_without_href() {
    let (_, stories) = parse_front_page(FRONT_PAGE, 10, &base()).unwrap();

    assert_eq!(stories.len(), 10);
    let launch = &stories[6];
    assert_eq!(launch.rank, 7);
    assert!(launch.title.starts_with("Launch HN: Widgetly"));
    assert_eq!(launch.link, None);
    assert_eq!(
        launch.discussion_url.as_deref(),
        Some("https://news.ycombinator.com/item?id=41000007")
    );
}

#[test]
fn test_fixture_limit_above_rows() {
    let (total, stories) = parse_front_page(FRONT_PAGE, 50, &base()).unwrap();
    assert_eq!(total, 10);
    assert_eq!(stories.len(), 10);
    assert_eq!(stories.last().map(|s| s.rank), Some(10));
}

#[test]
fn test_front_page_json_shape() {
    let (total_rows, stories) = parse_front_page(FRONT_PAGE, 2, &base()).unwrap();
    let page = FrontPage {
        source_url: base().to_string(),
        final_url: base().to_string(),
        fetched_at: chrono::Utc::now(),
        total_rows,
        load_time_ms: 840,
        stories,
    };

    let value = serde_json::to_value(&page).unwrap();
    assert_json_include!(
        actual: value,
        expected: json!({
            "source_url": "https://news.ycombinator.com/",
            "total_rows": 10,
            "stories": [
                {
                    "rank": 1,
                    "title": "Show HN: A tiny SQLite clone in 500 lines",
                    "link": "https://github.com/example/tinysql",
                    "item_id": 41000001,
                    "discussion_url": "https://news.ycombinator.com/item?id=41000001"
                },
                {
                    "rank": 2,
                    "title": "The surprising economics of undersea cables"
                }
            ]
        })
    );
}
