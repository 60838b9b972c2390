use apod_core::{MediaType, PictureRecord};
use chrono::NaiveDate;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn image_record(day: NaiveDate, title: &str, sd: &str, hd: &str) -> PictureRecord {
    PictureRecord::builder()
        .date(day)
        .title(title)
        .explanation(format!("Explanation for {}", title))
        .media_type(MediaType::Image)
        .standard_url(sd)
        .high_res_url(hd)
        .api_version("v1")
        .build()
        .unwrap()
}

pub fn video_record(day: NaiveDate, title: &str, url: &str) -> PictureRecord {
    PictureRecord::builder()
        .date(day)
        .title(title)
        .explanation(format!("Explanation for {}", title))
        .media_type(MediaType::Video)
        .standard_url(url)
        .api_version("v1")
        .build()
        .unwrap()
}
