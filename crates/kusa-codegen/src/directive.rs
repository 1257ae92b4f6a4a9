/// C# `#line` pragma mapping the following output back to `file:line`.
pub fn line_directive(file: &str, line: usize) -> String {
    format!("#line {} \"{}\"\n", line, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_directive() {
        assert_eq!(line_directive("[memory].gr", 1), "#line 1 \"[memory].gr\"\n");
        assert_eq!(line_directive("src/app.kusa", 42), "#line 42 \"src/app.kusa\"\n");
    }
}
