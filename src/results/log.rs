//! B-RISK run log (`*_log.rtf`)
//!
//! The log is the only place where B-RISK reports when sprinklers and smoke
//! detectors activated. It is written as RTF, so the text is extracted first
//! and the event lines are then picked out by keyword.

use std::fmt;

use encoding_rs::WINDOWS_1252;

/// Kind of device that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Sprinkler,
    SmokeDetector,
}

/// A device activation reported in the run log
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: EventKind,

    /// Display name, e.g. `Sprinkler 2` or `Smoke detector 1`
    pub name: String,

    /// Activation time (s)
    pub time: f64,
}

impl Event {
    /// Two-line chart label: name then activation time
    pub fn label(&self) -> String {
        format!("{}\n({} s)", self.name, self.time)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} activated at {} s", self.name, self.time)
    }
}

/// Parsed run log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunLog {
    /// Plain-text lines of the log, without trailing blank lines
    pub lines: Vec<String>,

    /// Sprinkler activations, in log order
    pub sprinklers: Vec<Event>,

    /// Smoke detector activations, in log order
    pub smoke_detectors: Vec<Event>,
}

impl RunLog {
    /// Parse the raw bytes of a `_log.rtf` file
    pub fn from_rtf_bytes(bytes: &[u8]) -> Self {
        parse_log(&rtf_to_text(&String::from_utf8_lossy(bytes)))
    }
}

/// Split the log text into lines and collect the device events
pub fn parse_log(text: &str) -> RunLog {
    let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let mut sprinklers = Vec::new();
    let mut smoke_detectors = Vec::new();

    for line in &lines {
        if line.contains("Sprinkler") && line.contains("responded") {
            if let Some(event) = parse_event(line, EventKind::Sprinkler, "Sprinkler", 3) {
                log::info!("Found: {event}");
                sprinklers.push(event);
            }
        }
        if line.contains("Smoke detector") && line.contains("operates") {
            if let Some(event) = parse_event(line, EventKind::SmokeDetector, "Smoke detector", 4) {
                log::info!("Found: {event}");
                smoke_detectors.push(event);
            }
        }
    }

    RunLog {
        lines,
        sprinklers,
        smoke_detectors,
    }
}

/// Event lines start with the time; the device number sits at `number_token`
fn parse_event(line: &str, kind: EventKind, prefix: &str, number_token: usize) -> Option<Event> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let time = tokens.first().and_then(|t| t.parse::<f64>().ok());
    let number = tokens.get(number_token);

    match (time, number) {
        (Some(time), Some(number)) if time.is_finite() => Some(Event {
            kind,
            name: format!("{prefix} {number}"),
            time,
        }),
        _ => {
            log::warn!("skipping malformed event line: {line:?}");
            None
        }
    }
}

// =================================================================================================
// RTF text extraction
// =================================================================================================

/// Groups whose content is never visible text
const IGNORED_DESTINATIONS: &[&str] = &[
    "aftncn", "aftnsep", "aftnsepc", "annotation", "atnauthor", "atndate", "atnicn", "atnid",
    "atnparent", "atnref", "atntime", "atrfend", "atrfstart", "author", "background",
    "bkmkend", "bkmkstart", "blipuid", "buptim", "category", "colorschememapping",
    "colortbl", "comment", "company", "creatim", "datafield", "datastore", "defchp", "defpap",
    "do", "doccomm", "docvar", "dptxbxtext", "ebcend", "ebcstart", "factoidname", "falt",
    "fchars", "ffdeftext", "ffentrymcr", "ffexitmcr", "ffformat", "ffhelptext", "ffl",
    "ffname", "ffstattext", "field", "file", "filetbl", "fldinst", "fldtype", "fname",
    "fontemb", "fontfile", "fonttbl", "footer", "footerf", "footerl", "footerr", "footnote",
    "formfield", "ftncn", "ftnsep", "ftnsepc", "g", "generator", "gridtbl", "header",
    "headerf", "headerl", "headerr", "hl", "hlfr", "hlinkbase", "hlloc", "hlsrc", "hsv",
    "htmltag", "info", "keycode", "keywords", "latentstyles", "lchars", "levelnumbers",
    "leveltext", "lfolevel", "linkval", "list", "listlevel", "listname", "listoverride",
    "listoverridetable", "listpicture", "liststylename", "listtable", "listtext",
    "lsdlockedexcept", "macc", "maccPr", "mailmerge", "maln", "malnScr", "manager", "margPr",
    "mbar", "mbarPr", "mbaseJc", "mbegChr", "mborderBox", "mborderBoxPr", "mbox", "mboxPr",
    "mchr", "mcount", "mctrlPr", "md", "mdeg", "mdegHide", "mden", "mdiff", "mdPr", "me",
    "mendChr", "meqArr", "meqArrPr", "mf", "mfName", "mfPr", "mfunc", "mfuncPr", "mgroupChr",
    "mgroupChrPr", "mgrow", "mhideBot", "mhideLeft", "mhideRight", "mhideTop", "mhtmltag",
    "mlim", "mlimloc", "mlimlow", "mlimlowPr", "mlimupp", "mlimuppPr", "mm", "mmaddfieldname",
    "mmath", "mmathPict", "mmathPr", "mmaxdist", "mmc", "mmcJc", "mmconnectstr",
    "mmconnectstrdata", "mmcPr", "mmcs", "mmdatasource", "mmheadersource", "mmmailsubject",
    "mmodso", "mmodsofilter", "mmodsofldmpdata", "mmodsomappedname", "mmodsoname",
    "mmodsorecipdata", "mmodsosort", "mmodsosrc", "mmodsotable", "mmodsoudl",
    "mmodsoudldata", "mmodsouniquetag", "mmPr", "mmquery", "mmr", "mnary", "mnaryPr",
    "mnoBreak", "mnum", "mobjDist", "moMath", "moMathPara", "moMathParaPr", "mopEmu",
    "mphant", "mphantPr", "mplcHide", "mpos", "mr", "mrad", "mradPr", "mrPr", "msepChr",
    "mshow", "mshp", "msPre", "msPrePr", "msSub", "msSubPr", "msSubSup", "msSubSupPr", "msSup",
    "msSupPr", "mstrikeBLTR", "mstrikeH", "mstrikeTLBR", "mstrikeV", "msub", "msubHide",
    "msup", "msupHide", "mtransp", "mtype", "mvertJc", "mvfmf", "mvfml", "mvtof", "mvtol",
    "mzeroAsc", "mzeroDesc", "mzeroWid", "nesttableprops", "nextfile", "nonesttables",
    "objalias", "objclass", "objdata", "object", "objname", "objsect", "objtime", "oldcprops",
    "oldpprops", "oldsprops", "oldtprops", "oleclsid", "operator", "panose", "password",
    "passwordhash", "pgp", "pgptbl", "picprop", "pict", "pn", "pnseclvl", "pntext",
    "pntxta", "pntxtb", "printim", "private", "propname", "protend", "protstart",
    "protusertbl", "pxe", "result", "revtbl", "revtim", "rsidtbl", "rxe", "shp", "shpgrp",
    "shpinst", "shppict", "shprslt", "shptxt", "sn", "sp", "staticval", "stylesheet",
    "subject", "sv", "svb", "tc", "template", "themedata", "title", "txe", "ud", "upr",
    "userprops", "wgrffmtfilter", "windowcaption", "writereservation",
    "writereservhash", "xe", "xform", "xmlattrname", "xmlattrvalue", "xmlclose", "xmlname",
    "xmlnstbl", "xmlopen",
];

/// Extract the visible text of an RTF document.
///
/// Paragraph and line breaks become `\n`, `\tab` becomes `\t`. Hex escapes
/// are decoded as Windows-1252 bytes, `\u` escapes as Unicode with the
/// fallback characters skipped according to `\uc`.
pub fn rtf_to_text(rtf: &str) -> String {
    let chars: Vec<char> = rtf.chars().collect();
    let mut out = String::with_capacity(rtf.len() / 2);

    // (unicode fallback count, ignorable) saved per group
    let mut stack: Vec<(usize, bool)> = Vec::new();
    let mut uc_skip = 1usize;
    let mut ignorable = false;
    let mut fallback_left = 0usize;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            '{' => {
                stack.push((uc_skip, ignorable));
                fallback_left = 0;
                i += 1;
            }
            '}' => {
                if let Some((uc, ign)) = stack.pop() {
                    uc_skip = uc;
                    ignorable = ign;
                }
                fallback_left = 0;
                i += 1;
            }
            '\\' => {
                i += 1;
                let Some(&next) = chars.get(i) else { break };

                if next.is_ascii_alphabetic() {
                    let start = i;
                    while i < chars.len() && chars[i].is_ascii_alphabetic() {
                        i += 1;
                    }
                    let word: String = chars[start..i].iter().collect();

                    let param_start = i;
                    if i < chars.len() && chars[i] == '-' {
                        i += 1;
                    }
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                    let param: Option<i64> = if i > param_start {
                        chars[param_start..i].iter().collect::<String>().parse().ok()
                    } else {
                        None
                    };
                    // a single space delimits the control word
                    if i < chars.len() && chars[i] == ' ' {
                        i += 1;
                    }

                    if IGNORED_DESTINATIONS.contains(&word.as_str()) {
                        ignorable = true;
                        continue;
                    }

                    match word.as_str() {
                        "uc" => uc_skip = param.unwrap_or(1).max(0) as usize,
                        "u" => {
                            if !ignorable {
                                let mut code = param.unwrap_or(0);
                                if code < 0 {
                                    code += 65536;
                                }
                                if let Some(ch) = u32::try_from(code).ok().and_then(char::from_u32) {
                                    out.push(ch);
                                }
                            }
                            fallback_left = uc_skip;
                        }
                        _ if ignorable => {}
                        "par" | "line" | "sect" | "page" | "row" => out.push('\n'),
                        "tab" | "cell" => out.push('\t'),
                        "emdash" => out.push('\u{2014}'),
                        "endash" => out.push('\u{2013}'),
                        "emspace" | "enspace" | "qmspace" => out.push(' '),
                        "bullet" => out.push('\u{2022}'),
                        "lquote" => out.push('\u{2018}'),
                        "rquote" => out.push('\u{2019}'),
                        "ldblquote" => out.push('\u{201C}'),
                        "rdblquote" => out.push('\u{201D}'),
                        _ => {}
                    }
                } else if next == '\'' {
                    let hex: String = chars.iter().skip(i + 1).take(2).collect();
                    i += 1 + hex.len();
                    if fallback_left > 0 {
                        fallback_left -= 1;
                    } else if !ignorable {
                        if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                            out.push_str(&WINDOWS_1252.decode_without_bom_handling(&[byte]).0);
                        }
                    }
                } else {
                    i += 1;
                    match next {
                        '*' => ignorable = true,
                        _ if ignorable => {}
                        '\\' | '{' | '}' => out.push(next),
                        '~' => out.push('\u{A0}'),
                        '_' => out.push('-'),
                        '\n' | '\r' => out.push('\n'),
                        _ => {}
                    }
                }
            }
            '\r' | '\n' => i += 1,
            _ => {
                if fallback_left > 0 {
                    fallback_left -= 1;
                } else if !ignorable {
                    out.push(c);
                }
                i += 1;
            }
        }
    }

    out
}
