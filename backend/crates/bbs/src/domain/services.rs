//! Domain Services
//!
//! Listing order and windowing shared by every repository implementation
//! that cannot push them down to a database.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;

use crate::domain::entities::{Article, ArticleSummary};
use crate::domain::value_objects::{ArticleSort, Page, PageRequest, SortOrder};

/// Total listing order: sort key first, then id, both in `order` direction.
pub fn compare_articles(a: &Article, b: &Article, sort: ArticleSort, order: SortOrder) -> Ordering {
    let primary = match sort {
        ArticleSort::CreatedAt => a.created_at.cmp(&b.created_at),
        ArticleSort::Title => a.content.title.cmp(&b.content.title),
    };
    let ordering = primary.then_with(|| a.id.cmp(&b.id));
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Sort, count, and cut one page of summaries.
pub fn paginate<'a, I>(articles: I, request: &PageRequest) -> Page<ArticleSummary>
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut sorted: Vec<&Article> = articles.into_iter().collect();
    sorted.sort_by(|a, b| compare_articles(a, b, request.sort(), request.order()));

    let records = sorted.len() as u64;
    let data = sorted
        .into_iter()
        .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
        .take(request.limit() as usize)
        .map(Article::summary)
        .collect();

    Page::new(request, records, data)
}

/// `[start, end)` of a UTC calendar day
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    // Only the last representable day overflows; it then matches nothing.
    let end = start.checked_add_days(Days::new(1)).unwrap_or(start);
    (start, end)
}

/// Latest article created on `date`; ties resolved by the larger id.
pub fn newest_of_day<'a, I>(articles: I, date: NaiveDate) -> Option<&'a Article>
where
    I: IntoIterator<Item = &'a Article>,
{
    let (start, end) = day_bounds(date);
    articles
        .into_iter()
        .filter(|article| article.created_at >= start && article.created_at < end)
        .max_by(|a, b| compare_articles(a, b, ArticleSort::CreatedAt, SortOrder::Asc))
}
