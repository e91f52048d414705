//! Multipart fixtures

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};

pub fn image_part(filename: &str, data: &'static [u8]) -> Part {
    Part::bytes(data).file_name(filename).mime_type("image/png")
}

pub fn video_part(filename: &str, data: &'static [u8]) -> Part {
    Part::bytes(data).file_name(filename).mime_type("video/mp4")
}

/// Form with one `files` part per payload, named `0.png`, `1.png`, ...
pub fn image_form(payloads: &[&'static [u8]]) -> MultipartForm {
    payloads
        .iter()
        .enumerate()
        .fold(MultipartForm::new(), |form, (i, data)| {
            form.add_part("files", image_part(&format!("{}.png", i), *data))
        })
}
