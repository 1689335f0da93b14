/// Date format used for record dates inside invoice descriptions: "01.02.24"
pub(crate) const INVOICE_DATE_FORMAT: &str = "%d.%m.%y";

/// Rendered in place of a missing trip date
pub(crate) const DATE_NOT_FOUND: &str = "Дата не найдена";

/// Rendered in place of a missing plate (such rows never become records)
pub(crate) const PLATE_UNKNOWN: &str = "Неизвестно";

/// Rendered in place of a missing driver surname
pub(crate) const DRIVER_NOT_FOUND: &str = "Фамилия не найдена";

/// Session used when none is given on the command line or in config
pub(crate) const DEFAULT_SESSION: &str = "default";

/// Number of groups shown by `top` when not overridden
pub(crate) const DEFAULT_TOP_N: usize = 5;
