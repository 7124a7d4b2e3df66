//! HTML pages for the coupon listing and redemption outcomes.

/// One row of the coupon listing.
#[derive(Debug, Clone)]
pub struct CouponRow {
    /// Coupon id
    pub id: i64,
    /// Redemption code
    pub code: String,
    /// Whether the coupon has been redeemed
    pub is_used: bool,
    /// Absolute URL that redeems this coupon
    pub redeem_url: String,
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

/// The listing page: a form that issues a coupon and a table of every coupon.
#[must_use]
pub fn index_page(rows: &[CouponRow]) -> String {
    let mut body = String::from(
        "    <h1>Coupon Manager</h1>\n\
         \x20   <h2>Generate New Coupon</h2>\n\
         \x20   <form method=\"post\" action=\"/\">\n\
         \x20       <button type=\"submit\">Generate Coupon</button>\n\
         \x20   </form>\n\
         \x20   <h2>Existing Coupons</h2>\n\
         \x20   <table border=\"1\">\n\
         \x20       <tr><th>ID</th><th>Code</th><th>Used</th><th>Redeem URL</th><th>QR Code</th></tr>\n",
    );

    for row in rows {
        let url = escape(&row.redeem_url);
        body.push_str(&format!(
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td><a href=\"{url}\">{url}</a></td><td><a href=\"/qrcode/{}\">View QR</a></td></tr>\n",
            row.id,
            escape(&row.code),
            if row.is_used { "Yes" } else { "No" },
            row.id,
        ));
    }

    body.push_str("    </table>\n");
    page("Coupon Manager", &body)
}

/// The redemption outcome page.
#[must_use]
pub fn redeem_page(message: &str) -> String {
    message_page("Redeem Coupon", message)
}

/// A page with a heading, one message and a link back to the listing.
#[must_use]
pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "    <h1>{}</h1>\n    <p>{}</p>\n    <a href=\"/\">Back to Home</a>\n",
        escape(title),
        escape(message)
    );
    page(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("0123abcd"), "0123abcd");
    }

    #[test]
    fn test_index_page_lists_rows() {
        let rows = vec![
            CouponRow {
                id: 1,
                code: "aaaa".to_string(),
                is_used: false,
                redeem_url: "http://h/redeem?code=aaaa".to_string(),
            },
            CouponRow {
                id: 2,
                code: "bbbb".to_string(),
                is_used: true,
                redeem_url: "http://h/redeem?code=bbbb&x=1".to_string(),
            },
        ];

        let html = index_page(&rows);
        assert!(html.contains("<h1>Coupon Manager</h1>"));
        assert!(html.contains("<tr><td>1</td><td>aaaa</td><td>No</td>"));
        assert!(html.contains("<tr><td>2</td><td>bbbb</td><td>Yes</td>"));
        assert!(html.contains("<a href=\"/qrcode/2\">View QR</a>"));
        assert!(html.contains("http://h/redeem?code=bbbb&amp;x=1"));
    }

    #[test]
    fn test_redeem_page() {
        let html = redeem_page("Coupon redeemed successfully!");
        assert!(html.contains("<p>Coupon redeemed successfully!</p>"));
        assert!(html.contains("<a href=\"/\">Back to Home</a>"));
    }
}
