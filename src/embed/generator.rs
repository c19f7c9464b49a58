//! C/C++ source generation for embedded resources.

const INNER_PADDING: &str = "\t\t";
const BYTES_PER_LINE: usize = 12;

/// One file to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Path as walked, with forward slashes
    pub path: String,
    pub data: Vec<u8>,
}

impl Resource {
    pub fn new(path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            data: data.into(),
        }
    }

    /// Variable name stem for this resource.
    pub fn identifier(&self) -> String {
        c_identifier(&self.path)
    }
}

/// Names and types the generated code is parameterised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// File stem shared by the header and source (`res` for `res.h`)
    pub stem: String,
    pub namespace: String,
    /// String type of the `_path` constants, e.g. `std::string`
    pub string_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSources {
    pub header: String,
    pub source: String,
}

/// Turn an arbitrary path into a C identifier: every character outside
/// `[A-Za-z0-9_]` becomes `_`, and a leading digit gets a `_` prefix.
pub fn c_identifier(text: &str) -> String {
    let mut id: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if id.is_empty() || id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// Render the header and source for `resources`, in the given order.
pub fn generate(resources: &[Resource], layout: &Layout) -> GeneratedSources {
    let guard = format!("{}_H", c_identifier(&layout.stem).to_ascii_uppercase());
    let string_type = &layout.string_type;

    let mut header = String::new();
    let mut source = String::new();

    header.push_str(&format!(
        "#ifndef {guard}\n#define {guard}\n#include <string>\n\nnamespace {} {{\n\tnamespace StaticResources {{\n",
        layout.namespace
    ));
    source.push_str(&format!(
        "#include \"{}.h\"\nnamespace {} {{\n\tnamespace StaticResources {{\n",
        layout.stem, layout.namespace
    ));

    for resource in resources {
        let id = resource.identifier();
        let path = &resource.path;
        let len = resource.data.len();

        header.push_str(&format!(
            "{INNER_PADDING}extern const {string_type} {id}_path;\n\
             {INNER_PADDING}extern unsigned int {id}_len;\n\
             {INNER_PADDING}extern unsigned char {id}[];\n"
        ));

        source.push_str(&format!(
            "{INNER_PADDING}// Data for file: {path}\n\
             {INNER_PADDING}const {string_type} {id}_path = R\"({path})\";\n\
             {INNER_PADDING}unsigned int {id}_len = {len};\n\
             {INNER_PADDING}unsigned char {id}[] = {{"
        ));
        source.push_str(&byte_array_body(&resource.data));
        source.push_str(&format!("\n{INNER_PADDING}}};\n\n"));
    }

    header.push_str("\n\t}\n}\n\n#endif\n");
    source.push_str("\n\t}\n}\n");

    GeneratedSources { header, source }
}

/// Comma separated `0x%02x` bytes, twelve per line.
///
/// Empty data still yields one element; zero-length arrays are not valid C++.
fn byte_array_body(data: &[u8]) -> String {
    if data.is_empty() {
        return format!("\n{INNER_PADDING}\t0x00");
    }

    let mut buf = String::with_capacity(data.len() * 6);
    for (i, b) in data.iter().enumerate() {
        if i % BYTES_PER_LINE == 0 {
            buf.push('\n');
            buf.push_str(INNER_PADDING);
            buf.push('\t');
        }
        buf.push_str(&format!("0x{b:02x}"));
        if i + 1 < data.len() {
            buf.push(',');
        }
    }
    buf
}
