//! The capture form.
//!
//! Pharmacy and rate options are templated from the authoritative sets in
//! rxsnap-core, so the form can never offer a value the server would reject.
//! The submit script posts via fetch, alerts the plain-text response, and
//! keeps the previous pharmacy/rate selections for the next delivery.

use axum::response::Html;
use rxsnap_core::models::{Rate, PHARMACIES};

pub async fn index() -> Html<String> {
    Html(render_form())
}

fn render_form() -> String {
    let pharmacy_options: String = PHARMACIES
        .iter()
        .map(|name| format!("                <option value='{name}'>{name}</option>\n"))
        .collect();
    let rate_options: String = Rate::ALL
        .iter()
        .map(|rate| {
            let code = rate.as_str();
            format!("                <option value='{code}'>{code}</option>\n")
        })
        .collect();

    format!(
        r#"<html>
    <body>
        <h2>Take a Picture, Select a Pharmacy and Rate, and Upload</h2>
        <form id='uploadForm' action='/upload' method='post' enctype='multipart/form-data' onsubmit='return uploadFile()'>
            <label for='file'>Take a Picture:</label>
            <input type='file' accept='image/*' capture='camera' name='file' required>
            <br><br>

            <label for='pharmacy'>Select Pharmacy:</label>
            <select name='pharmacy' id='pharmacy' required>
                <option value=''>--Select a Pharmacy--</option>
{pharmacy_options}            </select>
            <br><br>

            <label for='rate'>Select Rate:</label>
            <select name='rate' id='rate' required>
                <option value=''>--Select a Rate--</option>
{rate_options}            </select>
            <br><br>

            <input type='submit' value='Send'>
        </form>

        <script>
            function uploadFile() {{
                var formData = new FormData(document.getElementById('uploadForm'));
                var selectedPharmacy = document.getElementById('pharmacy').value;
                var selectedRate = document.getElementById('rate').value;

                fetch('/upload', {{
                    method: 'POST',
                    body: formData
                }})
                .then(response => response.text())
                .then(data => {{
                    alert(data);
                    document.getElementById('uploadForm').reset();
                    document.getElementById('pharmacy').value = selectedPharmacy;
                    document.getElementById('rate').value = selectedRate;
                }})
                .catch(error => console.error('Error:', error));
                return false;
            }}
        </script>
    </body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_lists_every_pharmacy_and_rate() {
        let html = render_form();
        for name in PHARMACIES {
            assert!(html.contains(&format!("value='{}'", name)));
        }
        for rate in Rate::ALL {
            assert!(html.contains(&format!("value='{}'", rate.as_str())));
        }
    }

    #[test]
    fn form_posts_multipart_to_upload() {
        let html = render_form();
        assert!(html.contains("action='/upload'"));
        assert!(html.contains("enctype='multipart/form-data'"));
    }
}
