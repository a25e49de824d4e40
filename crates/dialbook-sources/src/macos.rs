use crate::vcf::parse_vcf_phone_numbers;
use crate::{Result, SourceError};
use dialbook_core::DeviceBook;

/// The local macOS Contacts app, read through `osascript`.
#[derive(Debug, Clone, Default)]
pub struct MacosDeviceBook;

impl MacosDeviceBook {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceBook for MacosDeviceBook {
    type Error = SourceError;

    fn source_name(&self) -> &'static str {
        "macos-contacts"
    }

    fn phone_numbers(&self) -> Result<Vec<String>> {
        let vcf = fetch_contacts_vcf()?;
        Ok(parse_vcf_phone_numbers(&vcf))
    }
}

#[cfg(target_os = "macos")]
fn fetch_contacts_vcf() -> Result<String> {
    use std::process::Command;

    let script = r#"
set oldDelimiters to AppleScript's text item delimiters
set AppleScript's text item delimiters to linefeed
set cards to {}
set succeeded to false
repeat 5 times
    try
        tell application "Contacts"
            set cards to vcard of people
        end tell
        set succeeded to true
        exit repeat
    on error errMsg number errNum
        if errNum is -600 then
            tell application "Contacts" to launch
            delay 0.2
        else
            error errMsg number errNum
        end if
    end try
end repeat
if succeeded is false then
    error "Contacts did not respond" number -600
end if
if (count of cards) is 0 then
    set joined to ""
else
    set joined to cards as text
end if
set AppleScript's text item delimiters to oldDelimiters
return joined
"#;

    let output = Command::new("osascript").arg("-e").arg(script).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = if stderr.trim().is_empty() {
            format!("osascript exited with status {}", output.status)
        } else {
            stderr.trim().to_string()
        };
        return Err(SourceError::Command(message));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| SourceError::Parse("macOS Contacts output was not valid UTF-8".to_string()))
}

#[cfg(not(target_os = "macos"))]
fn fetch_contacts_vcf() -> Result<String> {
    Err(SourceError::Unavailable(
        "macOS Contacts is only available on macOS".to_string(),
    ))
}

#[cfg(all(test, not(target_os = "macos")))]
mod tests {
    use super::MacosDeviceBook;
    use crate::SourceError;
    use dialbook_core::DeviceBook;

    #[test]
    fn unavailable_off_macos() {
        let err = MacosDeviceBook::new().phone_numbers().unwrap_err();
        assert!(matches!(err, SourceError::Unavailable(_)));
    }
}
