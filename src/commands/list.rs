//! List site content

use anyhow::Result;

use crate::helpers::{date_json, full_url_for};
use crate::query;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str, tag: Option<&str>) -> Result<()> {
    let store = folio.store();

    match content_type {
        "post" | "posts" => {
            let posts = query::list_posts(&store, tag)?;
            match tag {
                Some(tag) if !tag.is_empty() => println!("Posts tagged {:?} ({}):", tag, posts.len()),
                _ => println!("Posts ({}):", posts.len()),
            }
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.pub_date.format("%Y-%m-%d"),
                    post.title,
                    full_url_for(&folio.config, &post.url)
                );
            }
        }
        "tag" | "tags" => {
            let entries = store.load_blog()?;
            let tags = query::tag_counts(&entries);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "resume" => {
            let items = store.load_resume()?;
            let academic = query::academic_timeline(&items);
            let work = query::work_timeline(&items);

            println!("Work ({}):", work.len());
            for item in work {
                println!("  {} - {} - {}, {}", item.start_year, item.end_year, item.title, item.subtitle);
            }
            println!("Academic ({}):", academic.len());
            for item in academic {
                println!("  {} - {} - {}, {}", item.start_year, item.end_year, item.title, item.subtitle);
            }
        }
        "json" => {
            // Same payload as GET /api/posts
            let posts = query::list_posts(&store, tag)?;
            println!("{}", serde_json::to_string_pretty(&posts)?);
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, resume, json",
                content_type
            );
        }
    }

    Ok(())
}

/// One-line summary of the newest post, used by `folio check`
pub fn latest_post(folio: &Folio) -> Result<Option<String>> {
    let posts = query::list_posts(&folio.store(), None)?;
    Ok(posts
        .first()
        .map(|post| format!("{} ({})", post.title, date_json(&post.pub_date))))
}
