//! Well-known library types installed into every table.
//!
//! The short lowercase keywords accepted in type tokens (`"int"`, `"list"`,
//! `"file"`, ...) map onto the canonical paths below. The resolver consults
//! [`WELL_KNOWN`] for the mapping; the builder installs every target so a
//! keyword can never name a class the table does not know.

use crate::{def::ClassId, table::TableBuilder};

/// Keyword, canonical path, generic arity.
///
/// Overlapping concepts get separate entries for the host-runtime-native and
/// the standard-library variant (`string` vs `javastring`).
pub const WELL_KNOWN: &[(&str, &str, usize)] = &[
    // Primitives.
    ("any", "kotlin/Any", 0),
    ("unit", "kotlin/Unit", 0),
    ("nothing", "kotlin/Nothing", 0),
    ("int", "kotlin/Int", 0),
    ("long", "kotlin/Long", 0),
    ("short", "kotlin/Short", 0),
    ("byte", "kotlin/Byte", 0),
    ("char", "kotlin/Char", 0),
    ("boolean", "kotlin/Boolean", 0),
    ("float", "kotlin/Float", 0),
    ("double", "kotlin/Double", 0),
    ("number", "kotlin/Number", 0),
    ("string", "kotlin/String", 0),
    ("charsequence", "kotlin/CharSequence", 0),
    ("throwable", "kotlin/Throwable", 0),
    // Primitive arrays.
    ("array", "kotlin/Array", 1),
    ("intarray", "kotlin/IntArray", 0),
    ("longarray", "kotlin/LongArray", 0),
    ("shortarray", "kotlin/ShortArray", 0),
    ("bytearray", "kotlin/ByteArray", 0),
    ("chararray", "kotlin/CharArray", 0),
    ("booleanarray", "kotlin/BooleanArray", 0),
    ("floatarray", "kotlin/FloatArray", 0),
    ("doublearray", "kotlin/DoubleArray", 0),
    // Collections.
    ("iterable", "kotlin/collections/Iterable", 1),
    ("iterator", "kotlin/collections/Iterator", 1),
    ("collection", "kotlin/collections/Collection", 1),
    ("list", "kotlin/collections/List", 1),
    ("mutablelist", "kotlin/collections/MutableList", 1),
    ("set", "kotlin/collections/Set", 1),
    ("mutableset", "kotlin/collections/MutableSet", 1),
    ("map", "kotlin/collections/Map", 2),
    ("mutablemap", "kotlin/collections/MutableMap", 2),
    ("pair", "kotlin/Pair", 2),
    ("triple", "kotlin/Triple", 3),
    // Text.
    ("stringbuilder", "kotlin/text/StringBuilder", 0),
    ("regex", "kotlin/text/Regex", 0),
    // Runtime interop.
    ("javastring", "java/lang/String", 0),
    ("object", "java/lang/Object", 0),
    ("class", "java/lang/Class", 1),
    ("optional", "java/util/Optional", 1),
    ("uuid", "java/util/UUID", 0),
    ("exception", "java/lang/Exception", 0),
    ("runtimeexception", "java/lang/RuntimeException", 0),
    // IO.
    ("file", "java/io/File", 0),
    ("path", "java/nio/file/Path", 0),
    ("inputstream", "java/io/InputStream", 0),
    ("outputstream", "java/io/OutputStream", 0),
    ("bufferedreader", "java/io/BufferedReader", 0),
    ("bufferedwriter", "java/io/BufferedWriter", 0),
    ("printwriter", "java/io/PrintWriter", 0),
    // Time.
    ("duration", "java/time/Duration", 0),
    ("instant", "java/time/Instant", 0),
    ("localdate", "java/time/LocalDate", 0),
    ("localdatetime", "java/time/LocalDateTime", 0),
    // Reflection.
    ("kclass", "kotlin/reflect/KClass", 1),
    // Concurrency.
    ("thread", "java/lang/Thread", 0),
    ("future", "java/util/concurrent/Future", 1),
    ("completablefuture", "java/util/concurrent/CompletableFuture", 1),
    ("executorservice", "java/util/concurrent/ExecutorService", 0),
    ("concurrenthashmap", "java/util/concurrent/ConcurrentHashMap", 2),
    ("atomicinteger", "java/util/concurrent/atomic/AtomicInteger", 0),
    ("atomiclong", "java/util/concurrent/atomic/AtomicLong", 0),
];

/// Looks up the canonical path for a lowercased keyword.
pub fn keyword_path(keyword: &str) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(kw, _, _)| *kw == keyword)
        .map(|(_, path, _)| *path)
}

/// Ids of the builtin classes the core refers to directly (literal typing,
/// erasure checks).
#[derive(Debug, Clone)]
pub struct Builtins {
    pub any: ClassId,
    pub unit: ClassId,
    pub nothing: ClassId,
    pub int: ClassId,
    pub long: ClassId,
    pub boolean: ClassId,
    pub double: ClassId,
    pub string: ClassId,
    pub pair: ClassId,
    pub list: ClassId,
}

impl Builtins {
    /// Transient all-zero value used while the builder bootstraps itself.
    pub(crate) fn placeholder() -> Self {
        let zero = ClassId::from_usize(0);
        Self {
            any: zero,
            unit: zero,
            nothing: zero,
            int: zero,
            long: zero,
            boolean: zero,
            double: zero,
            string: zero,
            pair: zero,
            list: zero,
        }
    }

    pub(crate) fn install(builder: &mut TableBuilder) -> Self {
        let mut installed = Self::placeholder();
        let params: [&str; 3] = ["A", "B", "C"];

        for &(keyword, path, arity) in WELL_KNOWN {
            let id = builder.add_class(path, &params[..arity]);
            match keyword {
                "any" => installed.any = id,
                "unit" => installed.unit = id,
                "nothing" => installed.nothing = id,
                "int" => installed.int = id,
                "long" => installed.long = id,
                "boolean" => installed.boolean = id,
                "double" => installed.double = id,
                "string" => installed.string = id,
                "pair" => installed.pair = id,
                "list" => installed.list = id,
                _ => {}
            }
        }

        installed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableBuilder;

    #[test]
    fn every_keyword_target_is_installed() {
        let table = TableBuilder::new().finish();
        for &(_, path, arity) in WELL_KNOWN {
            let id = table
                .class_by_path(path)
                .unwrap_or_else(|| panic!("{path} not installed"));
            assert_eq!(table.class(id).type_params.len(), arity, "{path}");
        }
    }

    #[test]
    fn keyword_lookup_maps_variants_separately() {
        assert_eq!(keyword_path("string"), Some("kotlin/String"));
        assert_eq!(keyword_path("javastring"), Some("java/lang/String"));
        assert_eq!(keyword_path("missing"), None);
    }
}
