//! Embedded assets for the web view.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>finedust</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <main>
    <h1>finedust</h1>
    <p class="hint">Nearest-station air quality readings (AirKorea)</p>
    <button id="locate">Use my location</button>
    <p id="status"></p>
    <section id="result" hidden>
      <h2 id="station"></h2>
      <p id="address"></p>
      <p id="khai" class="khai"></p>
      <p id="data-time" class="hint"></p>
      <table>
        <tbody id="pollutants"></tbody>
      </table>
    </section>
  </main>
  <script src="/app.js"></script>
</body>
</html>
"#;

pub const STYLE_CSS: &str = r#"body {
  font-family: system-ui, sans-serif;
  max-width: 32rem;
  margin: 2rem auto;
  padding: 0 1rem;
  color: #222;
}
h1 { margin-bottom: 0; }
.hint { color: #777; margin-top: 0.25rem; }
button {
  font-size: 1rem;
  padding: 0.5rem 1rem;
  cursor: pointer;
}
.khai { font-size: 1.5rem; }
table { border-collapse: collapse; width: 100%; }
td { padding: 0.3rem 0.5rem; border-bottom: 1px solid #eee; }
td.value { text-align: right; font-variant-numeric: tabular-nums; }
.error { color: crimson; }
"#;

pub const APP_JS: &str = r#"const LABELS = {
  pm10: ["PM10 (fine dust)", "㎍/㎥"],
  pm25: ["PM2.5 (ultrafine)", "㎍/㎥"],
  so2: ["SO2", "ppm"],
  co: ["CO", "ppm"],
  o3: ["O3", "ppm"],
  no2: ["NO2", "ppm"],
};

const status = document.getElementById("status");
const result = document.getElementById("result");

document.getElementById("locate").addEventListener("click", () => {
  if (!navigator.geolocation) {
    showError("Geolocation is not available in this browser.");
    return;
  }
  status.textContent = "Locating…";
  status.classList.remove("error");
  navigator.geolocation.getCurrentPosition(
    (pos) => fetchAir(pos.coords.latitude, pos.coords.longitude),
    () => showError("Could not obtain a location fix."),
  );
});

async function fetchAir(lat, lon) {
  status.textContent = "Fetching readings…";
  try {
    const res = await fetch(`/api/air?lat=${lat}&lon=${lon}`);
    const body = await res.json();
    if (!res.ok) {
      showError(body.error || "Request failed.");
      return;
    }
    render(body);
  } catch (e) {
    showError("Network error.");
  }
}

function render(body) {
  status.textContent = "";
  document.getElementById("station").textContent = body.station;
  document.getElementById("address").textContent = body.address || "";
  const khai = document.getElementById("khai");
  khai.textContent =
    `${body.khai.grade.label} ${body.khai.grade.emoji}` +
    (body.khai.value ? ` (KHAI ${body.khai.value})` : "");
  khai.style.color = body.khai.grade.color;
  document.getElementById("data-time").textContent = body.data_time
    ? `Measured ${body.data_time} KST`
    : "";

  const rows = document.getElementById("pollutants");
  rows.replaceChildren();
  for (const [key, [label, unit]] of Object.entries(LABELS)) {
    const p = body[key];
    const tr = document.createElement("tr");
    tr.innerHTML =
      `<td>${label}</td>` +
      `<td class="value">${p.value ?? "???"} ${unit}</td>` +
      `<td style="color:${p.grade.color}">${p.grade.label} ${p.grade.emoji}</td>`;
    rows.appendChild(tr);
  }
  result.hidden = false;
}

function showError(message) {
  result.hidden = true;
  status.textContent = message;
  status.classList.add("error");
}
"#;
