use crate::error::ValueError;

/// Conversion of a typed value into the text stored in a section.
pub trait ToIni {
    fn to_ini(&self) -> String;
}

/// Conversion of stored text back into a typed value.
pub trait FromIni: Sized {
    fn from_ini(text: &str) -> Result<Self, ValueError>;
}

/// Outcome of a typed lookup that falls back to a caller-supplied default.
///
/// A key that is missing and a key whose text does not parse both end up as
/// [`Lookup::Defaulted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Defaulted(T),
}

impl<T> Lookup<T> {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(..))
    }

    #[must_use]
    pub fn value(&self) -> &T {
        match self {
            Self::Found(value) | Self::Defaulted(value) => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> T {
        match self {
            Self::Found(value) | Self::Defaulted(value) => value,
        }
    }
}

impl<T: ToIni + ?Sized> ToIni for &T {
    fn to_ini(&self) -> String {
        (**self).to_ini()
    }
}

impl ToIni for str {
    fn to_ini(&self) -> String {
        self.to_owned()
    }
}

impl ToIni for String {
    fn to_ini(&self) -> String {
        self.clone()
    }
}

impl FromIni for String {
    fn from_ini(text: &str) -> Result<Self, ValueError> {
        Ok(text.to_owned())
    }
}

impl ToIni for bool {
    fn to_ini(&self) -> String {
        String::from(if *self { "True" } else { "False" })
    }
}

impl FromIni for bool {
    fn from_ini(text: &str) -> Result<Self, ValueError> {
        let text = text.trim();

        if text.is_empty() {
            return Err(ValueError::Empty);
        }

        if ["true", "1", "yes"].iter().any(|t| text.eq_ignore_ascii_case(t)) {
            Ok(true)
        } else if ["false", "0", "no"].iter().any(|t| text.eq_ignore_ascii_case(t)) {
            Ok(false)
        } else {
            Err(ValueError::InvalidBool {
                text: text.to_owned(),
            })
        }
    }
}

/// Comma-separated list, stored as a single string.
impl ToIni for [String] {
    fn to_ini(&self) -> String {
        self.join(",")
    }
}

impl ToIni for Vec<String> {
    fn to_ini(&self) -> String {
        self.as_slice().to_ini()
    }
}

impl FromIni for Vec<String> {
    fn from_ini(text: &str) -> Result<Self, ValueError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(text.split(',').map(|item| item.trim().to_owned()).collect())
    }
}

/// Split off a `0x`/`0X` prefix, returning the digits and their radix.
fn radix_of(digits: &str) -> (&str, u32) {
    match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    }
}

fn invalid_number(text: &str) -> ValueError {
    ValueError::InvalidNumber {
        text: text.to_owned(),
    }
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {$(
        impl ToIni for $t {
            fn to_ini(&self) -> String {
                self.to_string()
            }
        }

        impl FromIni for $t {
            fn from_ini(text: &str) -> Result<Self, ValueError> {
                let text = text.trim();

                if text.is_empty() {
                    return Err(ValueError::Empty);
                }

                let (negative, unsigned) = match text.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, text.strip_prefix('+').unwrap_or(text)),
                };
                let (digits, radix) = radix_of(unsigned);

                // `from_str_radix` accepts its own sign; only one is allowed.
                if digits.starts_with(['+', '-']) {
                    return Err(invalid_number(text));
                }

                let parsed = if negative {
                    <$t>::from_str_radix(&format!("-{digits}"), radix)
                } else {
                    <$t>::from_str_radix(digits, radix)
                };

                parsed.map_err(|_| invalid_number(text))
            }
        }
    )*};
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($t:ty),* $(,)?) => {$(
        // `Display` for floats prints the shortest text that parses back to the same bits.
        impl ToIni for $t {
            fn to_ini(&self) -> String {
                self.to_string()
            }
        }

        impl FromIni for $t {
            fn from_ini(text: &str) -> Result<Self, ValueError> {
                let text = text.trim();

                if text.is_empty() {
                    return Err(ValueError::Empty);
                }

                text.parse::<$t>().map_err(|_| invalid_number(text))
            }
        }
    )*};
}

impl_float!(f32, f64);
