//! Uploaded file handles and content-type detection.

use std::fmt;
use std::rc::Rc;

use image::ImageFormat;

/// A single file received from a drop payload or the file picker.
///
/// The bytes are reference-counted so cloning a handle (e.g. into a
/// render closure) does not copy the file contents.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    name: String,
    bytes: Rc<[u8]>,
    mime_type: Option<&'static str>,
    type_origin: Option<TypeOrigin>,
}

/// Where a file's MIME type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOrigin {
    /// Recognized from the file's contents.
    Contents,
    /// Guessed from the name's extension; the contents were not
    /// recognized.
    Extension,
}

impl UploadedFile {
    /// Wrap a file's name and contents, detecting its MIME type.
    ///
    /// See [`detect_mime_type`] for how the type is determined.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Rc<[u8]>>) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let detected = detect_mime_type(&name, &bytes);
        Self {
            name,
            bytes,
            mime_type: detected.map(|(mime, _)| mime),
            type_origin: detected.map(|(_, origin)| origin),
        }
    }

    /// File name as reported by the browser.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Best-guess MIME type, or `None` if neither the contents nor the
    /// name identify a known image.
    #[must_use]
    pub const fn mime_type(&self) -> Option<&'static str> {
        self.mime_type
    }

    /// Where [`mime_type`](Self::mime_type) came from.
    #[must_use]
    pub const fn type_origin(&self) -> Option<TypeOrigin> {
        self.type_origin
    }

    /// MIME type recognized from the contents, ignoring the name.
    #[must_use]
    pub fn sniffed_mime_type(&self) -> Option<&'static str> {
        match self.type_origin {
            Some(TypeOrigin::Contents) => self.mime_type,
            Some(TypeOrigin::Extension) | None => None,
        }
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Returns `true` if the file has no contents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .field("type_origin", &self.type_origin)
            .finish()
    }
}

const SVG_MIME: &str = "image/svg+xml";

/// How far into a file to look for an `<svg` root element.
const SVG_SNIFF_LEN: usize = 4096;

/// Detect an image MIME type from file contents, falling back to the name.
///
/// Magic bytes win over the extension, so a PNG renamed to `photo.jpg`
/// reports `image/png`. SVG has no magic number; it is recognized by an
/// `<svg` element near the start of a text file. The extension is only
/// consulted when the contents are not recognized, and the result is
/// tagged [`TypeOrigin::Extension`] so callers can refuse to trust it.
#[must_use]
pub fn detect_mime_type(name: &str, bytes: &[u8]) -> Option<(&'static str, TypeOrigin)> {
    if let Ok(format) = image::guess_format(bytes) {
        return Some((format.to_mime_type(), TypeOrigin::Contents));
    }
    if looks_like_svg(bytes) {
        return Some((SVG_MIME, TypeOrigin::Contents));
    }
    let ext = extension(name)?;
    let mime = if ext.eq_ignore_ascii_case("svg") {
        SVG_MIME
    } else {
        ImageFormat::from_extension(ext)?.to_mime_type()
    };
    Some((mime, TypeOrigin::Extension))
}

/// Returns `true` if `bytes` start like an SVG document: markup (after
/// an optional BOM and whitespace) with an `<svg` element in the head.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(bytes.get(..SVG_SNIFF_LEN).unwrap_or(bytes));
    let text = head.trim_start_matches('\u{feff}').trim_start();
    let markup = ["<svg", "<?xml", "<!--", "<!DOCTYPE svg"]
        .into_iter()
        .any(|prefix| text.starts_with(prefix));
    markup && text.contains("<svg")
}

/// Extension of `name` without the dot, if it has a non-empty one.
pub(crate) fn extension(name: &str) -> Option<&str> {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Encode a tiny solid-color RGBA image as PNG.
    pub fn tiny_png() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 40, 40, 255]));
        let mut buf = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buf);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgba8,
        )
        .unwrap();
        buf
    }

    #[test]
    fn png_contents_detected_as_png() {
        let file = UploadedFile::new("cat.png", tiny_png());
        assert_eq!(file.mime_type(), Some("image/png"));
        assert_eq!(file.type_origin(), Some(TypeOrigin::Contents));
    }

    #[test]
    fn magic_bytes_override_misleading_extension() {
        let file = UploadedFile::new("cat.jpg", tiny_png());
        assert_eq!(file.mime_type(), Some("image/png"));
    }

    #[test]
    fn unrecognized_contents_are_typed_by_name_only() {
        let file = UploadedFile::new("notes.png", b"just some text, not an image".as_slice());
        assert_eq!(file.mime_type(), Some("image/png"));
        assert_eq!(file.type_origin(), Some(TypeOrigin::Extension));
        assert_eq!(file.sniffed_mime_type(), None);
    }

    #[test]
    fn svg_detected_from_contents() {
        let bare = UploadedFile::new(
            "logo.svg",
            br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4"/>"#.as_slice(),
        );
        assert_eq!(bare.sniffed_mime_type(), Some("image/svg+xml"));

        let with_prolog = UploadedFile::new(
            "logo",
            b"\xef\xbb\xbf<?xml version=\"1.0\"?>\n<!-- icon -->\n<svg viewBox=\"0 0 1 1\"></svg>"
                .as_slice(),
        );
        assert_eq!(with_prolog.mime_type(), Some("image/svg+xml"));
        assert_eq!(with_prolog.type_origin(), Some(TypeOrigin::Contents));
    }

    #[test]
    fn html_mentioning_svg_is_not_svg() {
        let file = UploadedFile::new("page.html", b"<html><body><svg></svg></body></html>".as_slice());
        assert_eq!(file.mime_type(), None);
    }

    #[test]
    fn svg_extension_without_markup_is_name_only() {
        let file = UploadedFile::new("logo.SVG", b"plain text".as_slice());
        assert_eq!(file.mime_type(), Some("image/svg+xml"));
        assert_eq!(file.sniffed_mime_type(), None);
    }

    #[test]
    fn text_file_has_no_image_type() {
        let file = UploadedFile::new("notes.txt", b"hello world".as_slice());
        assert_eq!(file.mime_type(), None);
    }

    #[test]
    fn name_without_extension() {
        assert_eq!(extension("README"), None);
        assert_eq!(extension("trailing."), None);
        assert_eq!(extension("archive.tar.gz"), Some("gz"));
    }

    #[test]
    fn debug_omits_contents() {
        let file = UploadedFile::new("cat.png", tiny_png());
        let dbg = format!("{file:?}");
        assert!(dbg.contains("cat.png"));
        assert!(dbg.contains("size"));
        assert!(!dbg.contains("bytes"));
    }

    #[test]
    fn clones_share_contents() {
        let file = UploadedFile::new("cat.png", tiny_png());
        let copy = file.clone();
        assert_eq!(file, copy);
        assert!(std::ptr::eq(file.bytes().as_ptr(), copy.bytes().as_ptr()));
    }
}
