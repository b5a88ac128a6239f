//! Markdown caption for posting a finished review

use super::format_score;
use crate::models::Album;

const MISSING: &str = "n/a";

/// Render the post caption: headline, picks, score, then hashtags.
///
/// Genre hashtags drop spaces ("hip hop" becomes `#hiphop`).
pub fn render_caption(album: &Album) -> String {
    let genre_tags: Vec<String> = album
        .genre
        .iter()
        .map(|g| format!("#{}", g.replace(' ', "")))
        .collect();

    let mut hashtags = String::from("#AlbumReview");
    for tag in &genre_tags {
        hashtags.push(' ');
        hashtags.push_str(tag);
    }

    let score = album
        .final_score
        .map(format_score)
        .unwrap_or_else(|| MISSING.to_string());

    format!(
        "**Album Review:** {} - {}\n\n\
         Fav: {}\n\
         Least: {}\n\
         Best moment: {}\n\
         Score: {}/10\n\n\
         {}\n",
        album.album,
        album.artist,
        album.favourite_song.as_deref().unwrap_or(MISSING),
        album.least_favourite_song.as_deref().unwrap_or(MISSING),
        album.best_moment.as_deref().unwrap_or(MISSING),
        score,
        hashtags,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_caption() {
        let mut album = Album::new("1", "Kendrick Lamar", "To Pimp a Butterfly")
            .with_genres(vec!["hip hop".to_string(), "jazz rap".to_string()]);
        album.favourite_song = Some("Alright".to_string());
        album.least_favourite_song = Some("For Sale?".to_string());
        album.best_moment = Some("The poem reveal".to_string());
        album.final_score = Some(10.0);

        let caption = render_caption(&album);
        assert_eq!(
            caption,
            "**Album Review:** To Pimp a Butterfly - Kendrick Lamar\n\n\
             Fav: Alright\n\
             Least: For Sale?\n\
             Best moment: The poem reveal\n\
             Score: 10.0/10\n\n\
             #AlbumReview #hiphop #jazzrap\n"
        );
    }

    #[test]
    fn test_render_caption_incomplete() {
        let caption = render_caption(&Album::new("1", "A", "B"));
        assert!(caption.contains("Fav: n/a\n"));
        assert!(caption.contains("Score: n/a/10\n"));
        assert!(caption.ends_with("#AlbumReview\n"));
    }
}
