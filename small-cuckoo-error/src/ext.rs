use std::{any::Any, error::Error};

use crate::StatusCode;

/// Расширение для ошибок индекса (object-safe).
///
/// Предоставляет вспомогательные методы для работы с ошибками:
/// - извлечение статус-кода,
/// - безопасное сообщение для вызывающей стороны,
/// - детализированное сообщение для логов.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Статус ошибки.
    ///
    /// По умолчанию возвращает [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Возвращает ошибку как [`Any`](std::any::Any),
    /// чтобы можно было выполнить downcast к конкретному типу.
    fn as_any(&self) -> &dyn Any;

    /// Безопасное сообщение для внешнего потребителя.
    ///
    /// Для внутренних ошибок возвращает строку `"Internal error"`.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::Unknown | StatusCode::Internal | StatusCode::Unexpected => {
                "Internal error".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Детализированное сообщение для логов.
    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Имя типа ошибки (для логирования).
    fn type_name(&self) -> String {
        std::any::type_name::<Self>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, error::Error, fmt};

    use super::*;

    // Вспомогательный тип ошибки без переопределения status_code (использует
    // default = Internal).
    #[derive(Debug)]
    struct DefaultError(pub &'static str);

    impl fmt::Display for DefaultError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "DefaultError: {}", self.0)
        }
    }

    impl Error for DefaultError {}

    impl ErrorExt for DefaultError {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    // Вспомогательный тип ошибки, возвращающий конкретный StatusCode::NotFound.
    #[derive(Debug)]
    struct NotFoundError(pub &'static str);

    impl fmt::Display for NotFoundError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "NotFound: {}", self.0)
        }
    }

    impl Error for NotFoundError {}

    impl ErrorExt for NotFoundError {
        fn status_code(&self) -> StatusCode {
            StatusCode::NotFound
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Тест проверяет, что по умолчанию статус ошибки — `Internal`.
    #[test]
    fn test_default_status_code_is_internal() {
        let e = DefaultError("oops");
        assert_eq!(e.status_code(), StatusCode::Internal);
    }

    /// Тест проверяет, что для внутренних ошибок `client_message` не раскрывает
    /// детали.
    #[test]
    fn test_client_message_internal() {
        let e = DefaultError("sensitive");
        assert_eq!(e.client_message(), "Internal error");
    }

    /// Тест проверяет, что для не-internal кодов `client_message` возвращает
    /// `Display`.
    #[test]
    fn test_client_message_non_internal() {
        let e = NotFoundError("nope");
        assert_eq!(e.client_message(), e.to_string());
    }

    /// Тест проверяет, что `as_any` позволяет выполнить downcast к конкретному
    /// типу.
    #[test]
    fn test_as_any_downcast() {
        let e = NotFoundError("x");
        let down = e.as_any().downcast_ref::<NotFoundError>();
        assert_eq!(down.map(|d| d.0), Some("x"));
    }

    #[test]
    fn test_log_message_matches_debug() {
        let e = NotFoundError("dbg");
        assert_eq!(e.log_message(), format!("{e:?}"));
    }

    /// Тест проверяет, что `type_name` возвращает короткое имя типа (без
    /// модулей).
    #[test]
    fn test_type_name_returns_short_struct_name() {
        let e = NotFoundError("n");
        assert!(e.type_name().ends_with("NotFoundError"));
    }
}
