// Adapter Manager - Command Runner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Execution of external commands.
//!
//! The core never spawns processes itself: it hands a [`CommandSpec`] to a
//! [`CommandRunner`] and gets decoded text back. [`SystemRunner`] is the
//! production implementation; tests substitute a recording fake.

use oem_cp::code_table::{
    DECODING_TABLE_CP437, DECODING_TABLE_CP850, DECODING_TABLE_CP852, DECODING_TABLE_CP860,
    DECODING_TABLE_CP863, DECODING_TABLE_CP865,
};
use oem_cp::decode_string_complete_table;
use once_cell::sync::OnceCell;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

use crate::models::{Error, Result};

/// Registry value holding the console (OEM) code page.
const CODE_PAGE_QUERY: &str =
    r"Get-ItemPropertyValue HKLM:\SYSTEM\CurrentControlSet\Control\Nls\CodePage OEMCP";

/// Program and arguments of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// A PowerShell pipeline run through `shell`.
    pub fn shell(shell: impl Into<String>, script: impl Into<String>) -> Self {
        Self::new(shell).args(["-NoProfile".to_string(), "-Command".to_string(), script.into()])
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Last argument: the script of a shell command.
    pub fn script(&self) -> String {
        self.args.last().cloned().unwrap_or_default()
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Decoded output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command printed any diagnostic text.
    pub fn has_diagnostics(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Executes commands and returns their decoded output.
///
/// A non-zero exit status is not an error; callers classify the diagnostic
/// text. `Err` means the command could not be run at all.
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for std::sync::Arc<R> {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        (**self).run(spec)
    }
}

/// How captured bytes are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// A legacy console code page.
    CodePage(u16),
}

impl TextEncoding {
    /// Interpret the `OEMCP` registry value.
    pub fn from_code_page(value: &str) -> Self {
        match value.trim().parse::<u16>() {
            Ok(65001) | Err(_) => Self::Utf8,
            Ok(page) => Self::CodePage(page),
        }
    }

    /// Decode captured bytes.
    ///
    /// DOS code pages use the OEM tables, Windows and East Asian code pages
    /// go through `encoding_rs`. Unknown code pages are read as UTF-8.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::CodePage(page) => {
                if let Some(table) = oem_table(*page) {
                    return decode_string_complete_table(bytes, table);
                }
                match codepage::to_encoding(*page) {
                    Some(encoding) => encoding.decode_without_bom_handling(bytes).0.into_owned(),
                    None => String::from_utf8_lossy(bytes).into_owned(),
                }
            }
        }
    }
}

/// Decoding table of a DOS code page.
fn oem_table(page: u16) -> Option<&'static [char; 128]> {
    match page {
        437 => Some(&DECODING_TABLE_CP437),
        850 => Some(&DECODING_TABLE_CP850),
        852 => Some(&DECODING_TABLE_CP852),
        860 => Some(&DECODING_TABLE_CP860),
        863 => Some(&DECODING_TABLE_CP863),
        865 => Some(&DECODING_TABLE_CP865),
        _ => None,
    }
}

/// Runs commands as child processes of this program.
#[derive(Debug)]
pub struct SystemRunner {
    shell_program: String,
    encoding: OnceCell<TextEncoding>,
}

impl SystemRunner {
    pub fn new(shell_program: impl Into<String>) -> Self {
        Self {
            shell_program: shell_program.into(),
            encoding: OnceCell::new(),
        }
    }

    /// Runner with a fixed encoding, skipping code page discovery.
    pub fn with_encoding(shell_program: impl Into<String>, encoding: TextEncoding) -> Self {
        let runner = Self::new(shell_program);
        let _ = runner.encoding.set(encoding);
        runner
    }

    /// Console encoding, discovered on first use.
    pub fn encoding(&self) -> TextEncoding {
        *self.encoding.get_or_init(|| self.discover_encoding())
    }

    fn discover_encoding(&self) -> TextEncoding {
        let spec = CommandSpec::shell(&self.shell_program, CODE_PAGE_QUERY);
        match self.spawn(&spec) {
            Ok((stdout, _)) => {
                let encoding = TextEncoding::from_code_page(&String::from_utf8_lossy(&stdout));
                debug!("Console encoding: {:?}", encoding);
                encoding
            }
            Err(e) => {
                warn!("Could not read console code page, using UTF-8: {}", e);
                TextEncoding::Utf8
            }
        }
    }

    fn spawn(&self, spec: &CommandSpec) -> Result<(Vec<u8>, Vec<u8>)> {
        let output = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::command_failed(&spec.program, e.to_string()))?;
        Ok((output.stdout, output.stderr))
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        let encoding = self.encoding();
        debug!("Running: {}", spec);

        let (stdout, stderr) = self.spawn(spec)?;
        Ok(CommandOutput {
            stdout: encoding.decode(&stdout),
            stderr: encoding.decode(&stderr),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_command() {
        let spec = CommandSpec::shell("powershell.exe", "Get-NetAdapter");
        assert_eq!(spec.args, vec!["-NoProfile", "-Command", "Get-NetAdapter"]);
        assert_eq!(spec.script(), "Get-NetAdapter");
        assert_eq!(spec.to_string(), "powershell.exe -NoProfile -Command Get-NetAdapter");
    }

    #[test]
    fn test_code_page_values() {
        assert_eq!(TextEncoding::from_code_page("65001\r\n"), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_code_page("850"), TextEncoding::CodePage(850));
        assert_eq!(TextEncoding::from_code_page(""), TextEncoding::Utf8);
    }

    #[test]
    fn test_decode_oem_code_pages() {
        let encoding = TextEncoding::CodePage(850);
        assert_eq!(encoding.decode(b"Ethernet"), "Ethernet");
        assert_eq!(encoding.decode(b"Conexi\xA2n de \xA0rea local"), "Conexión de área local");
        assert_eq!(TextEncoding::CodePage(437).decode(b"R\x82seau"), "Réseau");
    }

    #[test]
    fn test_decode_windows_code_pages() {
        assert_eq!(TextEncoding::CodePage(1252).decode(&[0x43, 0x61, 0x66, 0xE9]), "Café");
        assert_eq!(TextEncoding::CodePage(866).decode(&[0x91, 0xA5, 0xE2, 0xEC]), "Сеть");
        assert_eq!(TextEncoding::Utf8.decode("Café".as_bytes()), "Café");
    }

    #[test]
    fn test_decode_unknown_code_page_as_utf8() {
        assert_eq!(TextEncoding::CodePage(1).decode("Café".as_bytes()), "Café");
    }

    #[test]
    fn test_encoding_is_per_runner() {
        let runner = SystemRunner::with_encoding("pwsh", TextEncoding::CodePage(437));
        assert_eq!(runner.encoding(), TextEncoding::CodePage(437));
        let other = SystemRunner::with_encoding("pwsh", TextEncoding::Utf8);
        assert_eq!(other.encoding(), TextEncoding::Utf8);
    }

    #[test]
    fn test_missing_program_is_command_failed() {
        let runner = SystemRunner::with_encoding("unused", TextEncoding::Utf8);
        let result = runner.run(&CommandSpec::new("adapter-manager-no-such-program"));
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }
}
