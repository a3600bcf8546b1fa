//! C header and source templates.
//!
//! Each template is split at its single substitution point and assembled by
//! pushing fragments; the C text is full of braces, so `format!()` is kept out
//! of it.

const BANNER: &str = r#"
//
// Auto generated code by vspec2c
// See github.com/GENIVI/vehicle_signal_specification for details/
//
"#;

const HEADER_PREAMBLE: &str = r#"
#include <stdint.h>
#include <float.h>

typedef enum _vss_signal_type_e {
    VSS_INT8 = 0,
    VSS_UINT8 = 1,
    VSS_INT16 = 2,
    VSS_UINT16 = 3,
    VSS_INT32 = 4,
    VSS_UINT32 = 5,
    VSS_DOUBLE = 6,
    VSS_FLOAT = 7,
    VSS_BOOLEAN = 8,
    VSS_STRING = 9,
    VSS_STREAM = 10,
    VSS_NA = 11,
    VSS_INT64 = 12,
    VSS_UINT64 = 13,
} vss_signal_type_e;

typedef enum _vss_element_type_e {
    VSS_ATTRIBUTE = 0,
    VSS_BRANCH = 1,
    VSS_SENSOR = 2,
    VSS_ACTUATOR = 3,
    VSS_RBRANCH = 4,
    VSS_ELEMENT = 5,
} vss_element_type_e;

typedef struct _vss_signal_t {
    int index;
    int parent_index;
    const char *name;
    const char *uuid;
    vss_element_type_e element_type;
    vss_signal_type_e data_type;
    const char *unit_type;

    union  {
        int64_t i;
        double d;
    } min_val;

    union {
        int64_t i;
        double d;
    } max_val;

    const char *description;
    const char **enum_values;
    const char *sensor;
    const char *actuator;
} vss_signal_t;


// Return a signal struct pointer based on signal index.
extern vss_signal_t* vss_signal_by_index(int index);

// Return a signal struct pointer based on full signal path
extern vss_signal_t* vss_signal_by_name(char* path);

// Return the parent of a signal. Return 0 if signal is root.
extern vss_signal_t* vss_get_parent(vss_signal_t* signal);

// Populate the full path name to the given signal.
// The name will be stored in 'result'.
// No more than 'result_max_len' bytes will be copied.
// The copied name will always be null terminated.
// 'result' is returned.
// In case of error, an empty string is copied into result.
char* vss_get_signal_path(vss_signal_t* sig, char* result, int result_max_len);

extern vss_signal_t vss_signal[];

"#;

const SOURCE_ACCESSORS: &str = r#""

vss_signal_t* vss_signal_by_index(int index)
{
}

vss_signal_t* vss_signal_by_name(char* path)
{
}

vss_signal_t* vss_get_parent(vss_signal_t* signal)
{
}

vss_signal_t vss_signal[] = {
"#;

const SOURCE_TRAILER: &str = "};\n";

/// Header text: fixed declarations followed by the macro block.
pub fn render_header(macros: &str) -> String {
    let mut out =
        String::with_capacity(BANNER.len() + HEADER_PREAMBLE.len() + macros.len());
    out.push_str(BANNER);
    out.push_str(HEADER_PREAMBLE);
    out.push_str(macros);
    out
}

/// Source text: include of `header_file_name`, accessor stubs, record array.
pub fn render_source(records: &str, header_file_name: &str) -> String {
    let mut out = String::with_capacity(
        BANNER.len() + SOURCE_ACCESSORS.len() + records.len() + header_file_name.len() + 32,
    );
    out.push_str(BANNER);
    out.push_str("\n#include \"");
    out.push_str(header_file_name);
    out.push_str(SOURCE_ACCESSORS);
    out.push_str(records);
    out.push_str(SOURCE_TRAILER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_ends_with_macro_block() {
        let macros = "#define VSS_A() vss_signal_by_index(0)\n";
        let header = render_header(macros);

        assert!(header.contains("VSS_UINT64 = 13,"));
        assert!(header.contains("extern vss_signal_t vss_signal[];\n\n#define VSS_A()"));
        assert!(header.ends_with(macros));
    }

    #[test]
    fn source_includes_header_and_wraps_records() {
        let records = "    { 0, -1, \"A\" },\n";
        let source = render_source(records, "vss.h");

        assert!(source.contains("\n#include \"vss.h\"\n"));
        assert!(source.contains("vss_signal_t* vss_get_parent(vss_signal_t* signal)\n{\n}\n"));
        assert!(source.ends_with(
            "vss_signal_t vss_signal[] = {\n    { 0, -1, \"A\" },\n};\n"
        ));
    }

    #[test]
    fn empty_blocks_still_produce_valid_shapes() {
        assert!(render_header("").ends_with("extern vss_signal_t vss_signal[];\n\n"));
        assert_eq!(
            render_source("", "x.h").lines().last(),
            Some("};")
        );
    }
}
