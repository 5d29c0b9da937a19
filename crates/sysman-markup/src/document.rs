//! Fixed HTML document shell shared by manual pages and the index.
//!
//! Every document embeds the same stylesheet and opens with the
//! "GLIDIX MANUAL" header bar followed by a horizontal rule.

use std::fmt::Write;

use crate::html::escape_html;

/// Text of the header bar and the suffix of every document title.
pub const MANUAL_NAME: &str = "GLIDIX MANUAL";

/// Stylesheet embedded in every generated document.
pub const STYLESHEET: &str = r"
body
{
	font-family: monospace;
	background-color: #FFFFEE;
	font-size: 16px;
}

h1
{
	font-size: 20px;
	color: #990000;
}

h2
{
	font-size: 18px;
	color: #990000;
}

.code
{
	font-weight: bold;
	color: #660000;
}

.ref
{
	font-style: italic;
	font-weight: normal;
	color: #006600;
}

p, li
{
	margin-left: 1cm;
	margin-right: 1cm;
}

pre
{
	margin-left: 2cm;
	margin-right: 2cm;
	white-space: pre-wrap;
	word-wrap: break-word;
}

div.headbar
{
	font-weight: bold;
	text-align: center;
}

a:link, a:visited
{
	color: #0022AA;
	text-decoration: none;
}

a:hover, a:active
{
	color: #EE0000;
	text-decoration: underline;
}
";

/// Open a document: head with `title` and the stylesheet, then the header bar.
pub fn document_start(title: &str, out: &mut String) {
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    out.push_str("<style type=\"text/css\">\n");
    out.push_str(STYLESHEET);
    out.push_str("</style>\n</head>\n<body>\n");
    writeln!(out, "<div class=\"headbar\">{MANUAL_NAME}</div>").unwrap();
    out.push_str("<hr/>\n");
}

/// Close a document opened with [`document_start`].
pub fn document_end(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}
