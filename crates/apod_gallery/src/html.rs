//! HTML templates for the gallery page.

use apod_core::PictureRecord;

const HEAD: &str = "<!DOCTYPE html>
<html>
  <head>
    <title>NASA :: Astronomic Picture of the Day</title>
    <meta charset='UTF-8'>
    <meta name='description' content='Astronomy Picture of the Day gallery'>
    <meta name='keywords' content='NASA, APOD, Astronomic, Picture, Day'>
    <meta name='author' content='NASA'>
    <meta name='viewport' content='width=device-width, initial-scale=1.0'>
    <style>
    .nasaDay { padding: 20px; }
    .nasaDate { font-weight: bold; }
    .nasaTitle { font-weight: bold; }
    .nasaExplanation { text-align: justify; text-justify: inter-word; padding-top: 10px; padding-bottom: 10px; }
    .nasaCopyright { font-style: italic; }
    .nasaImage {}
    .nasaPic { width: 100%; }
    .nasaVideo {}
    </style>
  </head>
  <body>
";

const TAIL: &str = "  </body>
</html>
";

/// Wrap fragments, in order, into a complete document.
pub(crate) fn document(fragments: &[String]) -> String {
    let mut page = String::from(HEAD);
    for fragment in fragments {
        page.push_str(fragment);
        page.push('\n');
    }
    page.push_str(TAIL);
    page
}

/// Escape text for use in element content or single/double quoted attributes.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Fragment for an image day: `src` is the high resolution location and
/// `lowsrc` the standard one.
pub(crate) fn image_fragment(record: &PictureRecord, src: &str, lowsrc: &str) -> String {
    let media = format!(
        "<img class='nasaPic' src='{}' lowsrc='{}' alt='{}'>",
        escape(src),
        escape(lowsrc),
        escape(record.title())
    );
    day_fragment(record, &media)
}

/// Fragment for a video day, embedding the remote URL directly.
pub(crate) fn video_fragment(record: &PictureRecord) -> String {
    let media = format!(
        "<embed class='nasaVideo' src='{}' alt='{}'>",
        escape(record.sd_url().unwrap_or_default()),
        escape(record.title())
    );
    day_fragment(record, &media)
}

fn day_fragment(record: &PictureRecord, media: &str) -> String {
    let mut html = format!(
        "    <div class='nasaDay'><div class='nasaDate'>{}</div><div class='nasaTitle'>{}</div><div class='nasaExplanation'>{}</div><div class='nasaImage'>{}</div>",
        record.date_string(),
        escape(record.title()),
        escape(record.explanation()),
        media
    );
    if let Some(notice) = record.copyright_line() {
        html.push_str(&format!(
            "<div class='nasaCopyright'><span style='font-weight:bold;font-style:normal;'>Copyright</span> - {}</div>",
            escape(notice)
        ));
    }
    html.push_str("</div>");
    html
}
