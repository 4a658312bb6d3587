//! Report language and the fixed user-facing texts for each language.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Language the report is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Arabic,
    English,
}

impl Locale {
    /// Language name as written into the prompt.
    pub fn language_name(&self) -> &'static str {
        match self {
            Locale::Arabic => "Arabic",
            Locale::English => "English",
        }
    }

    /// Description used when no social-media match survives filtering.
    pub fn no_trace_fallback(&self) -> &'static str {
        match self {
            Locale::Arabic => {
                "لم يتم العثور على أي 'أثر علني' لهذه الصورة. \n\n\
                 توضيح بخصوص المنشورات الخاصة: تقنياً، المنشورات الموجهة لـ 'الأصدقاء فقط' \
                 أو في 'الحسابات المغلقة' لا يمكن لأي محرك بحث الوصول إليها لأنها محمية بتشفير المنصة. \
                 إذا كانت صورتك هناك، فهي بأمان عن أعين المتطفلين طالما لم يقم أحد الأشخاص \
                 الموثوقين بتسريبها أو إعادة نشرها بشكل عام."
            }
            Locale::English => {
                "No 'public trace' of this image was found. \n\n\
                 About private posts: technically, posts shared with 'friends only' or on \
                 'locked accounts' cannot be reached by any search engine because the platform \
                 protects them. If your photo is there, it stays out of view of strangers as long \
                 as nobody you trust leaks it or republishes it publicly."
            }
        }
    }

    /// Title given to a match whose citation carries none.
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            Locale::Arabic => "رابط اجتماعي مكتشف",
            Locale::English => "Discovered social link",
        }
    }

    /// Description used when the model returned no text at all.
    pub fn no_data_description(&self) -> &'static str {
        match self {
            Locale::Arabic => "لم يتم العثور على بيانات.",
            Locale::English => "No data was found.",
        }
    }

    /// The single message shown for any analysis failure.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Locale::Arabic => {
                "حدث خطأ أثناء الفحص العميق. يرجى التأكد من اتصالك ومحاولة رفع الصورة مرة أخرى."
            }
            Locale::English => {
                "An error occurred during the deep scan. Check your connection and try uploading the image again."
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Arabic => "ar",
            Locale::English => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "arabic" => Ok(Locale::Arabic),
            "en" | "english" => Ok(Locale::English),
            other => Err(ConfigError::UnknownLocale(other.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
