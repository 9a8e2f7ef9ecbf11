use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

/// Default endpoint of the remote metadata service.
pub const DEFAULT_SERVICE_URL: &str = "https://suip.biz/ru/?act=mat";
/// Multipart field the remote service reads the uploaded file from.
pub const DEFAULT_UPLOAD_FIELD: &str = "fileforsending";

// The remote service prints its findings inside the first <pre> on the page.
selector!(PRE_SELECTOR, "pre");

/// Labels as printed by the remote service (it answers in Russian).
pub(crate) mod labels {
    pub(crate) const FILENAME: &str = "Название файла";
    pub(crate) const CATALOG: &str = "Каталог";
    pub(crate) const SIZE: &str = "Размер файла";
    pub(crate) const DATE_EDITED: &str = "Дата редактирования файла";
    pub(crate) const DATE_ACCESS: &str = "Дата последнего доступа к файлу";
    pub(crate) const DATE_UPDATE_INDEX: &str = "Дата изменения файлового индекса";
    pub(crate) const RESOLUTION: &str = "Разрешения файла";
    pub(crate) const FILE_TYPE: &str = "Тип файла";
    pub(crate) const EXTENSION: &str = "Расширение файла";
    pub(crate) const MIME_TYPE: &str = "MIME тип";
    pub(crate) const PDF_VERSION: &str = "Версия PDF";
    pub(crate) const PAGE_COUNT: &str = "Количество страниц";
    pub(crate) const CREATOR: &str = "Создатель";
    pub(crate) const PRODUCER: &str = "Производитель";
    pub(crate) const DATE_DIGITIZATION: &str = "Дата оцифровки";
}
