//! Listing form state and input helpers

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::domain::Amenities;

/// Image picked by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type = content_type_for(&file_name);
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Mirrors the `image/*` picker filter. Nothing enforces it before upload.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Inline `data:` URL usable as a preview source
    pub fn preview_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }
}

fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Rooms,
    People,
    Price,
}

/// Input class deciding which keystrokes a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Digits only
    Integer,
    /// Digits, `.` and `,` (price and discount inputs)
    Decimal,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Rooms,
        FormField::People,
        FormField::Price,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            FormField::Name => FieldKind::Text,
            FormField::Rooms | FormField::People => FieldKind::Integer,
            FormField::Price => FieldKind::Decimal,
        }
    }

    /// Change handler bound to this field.
    pub fn binder(self) -> impl Fn(&mut PublishForm, String) {
        move |form, value| form.set_field(self, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amenity {
    Wifi,
    AirConditioner,
    Breakfast,
    Parking,
    RoomService,
}

impl Amenity {
    pub const ALL: [Amenity; 5] = [
        Amenity::Wifi,
        Amenity::AirConditioner,
        Amenity::Breakfast,
        Amenity::Parking,
        Amenity::RoomService,
    ];

    /// Checkbox handler bound to this amenity.
    pub fn binder(self) -> impl Fn(&mut PublishForm, bool) {
        move |form, checked| form.set_amenity(self, checked)
    }

    fn flag(self, amenities: &mut Amenities) -> &mut bool {
        match self {
            Amenity::Wifi => &mut amenities.wifi,
            Amenity::AirConditioner => &mut amenities.air_conditioner,
            Amenity::Breakfast => &mut amenities.breakfast,
            Amenity::Parking => &mut amenities.parking,
            Amenity::RoomService => &mut amenities.room_service,
        }
    }
}

/// Keydown filter. Advisory: pasted or programmatic input is not checked.
///
/// A key passes when its name contains an allowed character, so named keys
/// such as `F5` slip through just like in a browser regex test.
pub fn accepts_key(kind: FieldKind, key: &str) -> bool {
    if key == "Backspace" || key == "Tab" {
        return true;
    }
    match kind {
        FieldKind::Text => true,
        FieldKind::Integer => key.chars().any(|c| c.is_ascii_digit()),
        FieldKind::Decimal => key
            .chars()
            .any(|c| c.is_ascii_digit() || c == '.' || c == ','),
    }
}

/// Clamp a discount percentage to `[0, 100]`.
pub fn clamp_discount(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Leading integer of `input`, ignoring leading whitespace and trailing garbage.
pub fn parse_int_prefix(input: &str) -> Option<i32> {
    let s = input.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value: i64 = digits[..end].parse().ok()?;
    i32::try_from(sign * value).ok()
}

/// Leading decimal number of `input`; `,` is read as the decimal point.
pub fn parse_decimal_prefix(input: &str) -> Option<f64> {
    let normalized = input.trim_start().replace(',', ".");
    let bytes = normalized.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    normalized[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// State of the "publish a reservation" form
#[derive(Debug, Clone, Default)]
pub struct PublishForm {
    name: String,
    rooms: String,
    people: String,
    price: String,
    image: Option<ImageFile>,
    image_preview: Option<String>,
    amenities: Amenities,
}

impl PublishForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Rooms => self.rooms = value,
            FormField::People => self.people = value,
            FormField::Price => self.price = value,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Rooms => &self.rooms,
            FormField::People => &self.people,
            FormField::Price => &self.price,
        }
    }

    pub fn set_amenity(&mut self, amenity: Amenity, checked: bool) {
        *amenity.flag(&mut self.amenities) = checked;
    }

    pub fn amenity(&self, amenity: Amenity) -> bool {
        let mut copy = self.amenities;
        *amenity.flag(&mut copy)
    }

    pub fn amenities(&self) -> Amenities {
        self.amenities
    }

    /// Pick a new image (replacing the preview) or clear the selection.
    pub fn select_image(&mut self, file: Option<ImageFile>) {
        self.image_preview = file.as_ref().map(ImageFile::preview_url);
        self.image = file;
    }

    pub fn image(&self) -> Option<&ImageFile> {
        self.image.as_ref()
    }

    pub fn image_preview(&self) -> Option<&str> {
        self.image_preview.as_deref()
    }

    /// First text field left empty, if any
    pub fn first_empty_field(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|f| self.field(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> ImageFile {
        ImageFile::new("quarto.png", "image/png", bytes.to_vec())
    }

    #[test]
    fn selecting_image_replaces_preview_and_none_clears_it() {
        let mut form = PublishForm::new();
        form.select_image(Some(png(b"one")));
        let first = form.image_preview().unwrap().to_string();
        assert_eq!(first, "data:image/png;base64,b25l");

        form.select_image(Some(png(b"two")));
        assert_ne!(form.image_preview().unwrap(), first);
        assert_eq!(form.image().unwrap().bytes, b"two");

        form.select_image(None);
        assert!(form.image().is_none());
        assert!(form.image_preview().is_none());
    }

    #[test]
    fn binders_write_their_own_field() {
        let mut form = PublishForm::new();
        let set_rooms = FormField::Rooms.binder();
        let set_parking = Amenity::Parking.binder();

        set_rooms(&mut form, "3".to_string());
        set_parking(&mut form, true);

        assert_eq!(form.field(FormField::Rooms), "3");
        assert_eq!(form.field(FormField::People), "");
        assert!(form.amenity(Amenity::Parking));
        assert!(!form.amenity(Amenity::Wifi));
        assert_eq!(
            form.amenities(),
            Amenities {
                parking: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn first_empty_field_follows_form_order() {
        let mut form = PublishForm::new();
        assert_eq!(form.first_empty_field(), Some(FormField::Name));
        form.set_field(FormField::Name, "Suite");
        form.set_field(FormField::Rooms, "1");
        assert_eq!(form.first_empty_field(), Some(FormField::People));
        form.set_field(FormField::People, "2");
        form.set_field(FormField::Price, "99");
        assert_eq!(form.first_empty_field(), None);
    }

    #[test]
    fn key_filter_by_kind() {
        assert!(accepts_key(FieldKind::Integer, "7"));
        assert!(!accepts_key(FieldKind::Integer, "."));
        assert!(!accepts_key(FieldKind::Integer, "a"));
        assert!(accepts_key(FieldKind::Decimal, ","));
        assert!(accepts_key(FieldKind::Decimal, "."));
        assert!(!accepts_key(FieldKind::Decimal, "-"));
        assert!(accepts_key(FieldKind::Text, "a"));
        for kind in [FieldKind::Integer, FieldKind::Decimal] {
            assert!(accepts_key(kind, "Backspace"));
            assert!(accepts_key(kind, "Tab"));
            assert!(!accepts_key(kind, "Enter"));
        }
        assert_eq!(FormField::Price.kind(), FieldKind::Decimal);
        assert_eq!(FormField::Rooms.kind(), FieldKind::Integer);
    }

    #[test]
    fn discount_is_clamped() {
        assert_eq!(clamp_discount(-5.0), 0.0);
        assert_eq!(clamp_discount(150.0), 100.0);
        assert_eq!(clamp_discount(12.5), 12.5);
        assert_eq!(clamp_discount(f64::NAN), 0.0);
    }

    #[test]
    fn integer_prefix_parsing() {
        assert_eq!(parse_int_prefix("5"), Some(5));
        assert_eq!(parse_int_prefix("  12abc"), Some(12));
        assert_eq!(parse_int_prefix("-3"), Some(-3));
        assert_eq!(parse_int_prefix("4.9"), Some(4));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("99999999999"), None);
    }

    #[test]
    fn decimal_prefix_parsing() {
        assert_eq!(parse_decimal_prefix("150.50"), Some(150.5));
        assert_eq!(parse_decimal_prefix("150,50"), Some(150.5));
        assert_eq!(parse_decimal_prefix(".5"), Some(0.5));
        assert_eq!(parse_decimal_prefix("7."), Some(7.0));
        assert_eq!(parse_decimal_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_decimal_prefix("2e"), Some(2.0));
        assert_eq!(parse_decimal_prefix("10.5.3"), Some(10.5));
        assert_eq!(parse_decimal_prefix("."), None);
        assert_eq!(parse_decimal_prefix("R$10"), None);
        assert_eq!(parse_decimal_prefix("1e999"), None);
        assert_eq!(parse_decimal_prefix("-1e400x"), None);
    }

    #[test]
    fn content_type_guess() {
        assert_eq!(content_type_for("Foto.JPG"), "image/jpeg");
        assert_eq!(content_type_for("fachada.tif"), "image/tiff");
        assert_eq!(content_type_for("favicon.ico"), "image/x-icon");
        assert_eq!(content_type_for("sem-extensao"), "application/octet-stream");
        assert!(ImageFile::new("a.png", "image/png", vec![]).is_image());
        assert!(!ImageFile::new("a.pdf", "application/pdf", vec![]).is_image());
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fachada.webp");
        tokio::fs::write(&path, b"RIFF").await.unwrap();

        let file = ImageFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "fachada.webp");
        assert_eq!(file.content_type, "image/webp");
        assert_eq!(file.bytes, b"RIFF");
    }
}
