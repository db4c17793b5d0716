//! Аварийное завершение при нарушении инвариантов.
//!
//! Индекс не пытается восстанавливаться после нарушения контракта: событие
//! логируется на уровне `error` и поток паникует. Встраивающее приложение,
//! которому нужен настоящий crash-only режим, собирается с
//! `panic = "abort"` и перезапускается из сохранённого дампа.

/// Логирует сообщение и паникует с префиксом `fatal:`.
macro_rules! fatal {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::error!(
            target: "small_cuckoo::fatal",
            location = concat!(file!(), ":", line!()),
            "{message}"
        );
        panic!("fatal: {message}");
    }};
}

/// Вызывает [`fatal!`], если условие ложно.
macro_rules! ensure_fatal {
    ($cond:expr, $($arg:tt)*) => {
        if !($cond) {
            $crate::fatal::fatal!($($arg)*);
        }
    };
}

pub(crate) use ensure_fatal;
pub(crate) use fatal;

#[cfg(test)]
mod tests {
    #[test]
    #[should_panic(expected = "fatal: slot 3 is out of range")]
    fn test_fatal_panics_with_prefix() {
        fatal!("slot {} is out of range", 3);
    }

    #[test]
    fn test_ensure_fatal_passes_when_true() {
        ensure_fatal!(1 + 1 == 2, "arithmetic is broken");
    }

    #[test]
    #[should_panic(expected = "fatal: invariant")]
    fn test_ensure_fatal_fires() {
        let n_entries = 0;
        ensure_fatal!(n_entries >= 1, "invariant n_entries >= 1 violated");
    }
}
