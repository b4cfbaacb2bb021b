pub fn render_index(date_label: &str) -> String {
    INDEX_HTML.replace("{{DATE}}", date_label)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Health Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef4f1;
      --bg-2: #c9e2d6;
      --ink: #2b2a28;
      --accent: #2d7a4b;
      --accent-2: #2f4858;
      --warn: #c63b2b;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3efe9 60%, #f4f8f6 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
      animation: rise 600ms ease;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0;
      font-size: 1.4rem;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .detail {
      font-size: 0.9rem;
      color: #6b645d;
    }

    .bar {
      height: 8px;
      border-radius: 999px;
      background: rgba(47, 72, 88, 0.1);
      overflow: hidden;
    }

    .bar span {
      display: block;
      height: 100%;
      background: var(--accent);
      width: 0;
      transition: width 300ms ease;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    #weight-chart {
      width: 100%;
      height: 320px;
      display: block;
    }

    .history-card {
      max-height: 360px;
      overflow: auto;
    }

    table.history {
      width: 100%;
      border-collapse: collapse;
      font-size: 0.9rem;
    }

    table.history th,
    table.history td {
      padding: 8px 10px;
      text-align: right;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    table.history th:first-child,
    table.history td:first-child {
      text-align: left;
    }

    table.history th {
      position: sticky;
      top: 0;
      background: white;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    form.entry {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
      align-items: end;
    }

    form.entry label {
      display: grid;
      gap: 4px;
      font-size: 0.85rem;
      color: #6b645d;
    }

    form.entry input,
    form.entry select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
      box-shadow: 0 10px 24px rgba(47, 72, 88, 0.3);
    }

    button:active {
      transform: scale(0.98);
    }

    .status {
      position: fixed;
      right: 24px;
      bottom: 24px;
      padding: 12px 18px;
      border-radius: 14px;
      background: white;
      box-shadow: var(--shadow);
      font-size: 0.95rem;
      color: #6b645d;
      opacity: 0;
      transition: opacity 200ms ease;
    }

    .status[data-type] {
      opacity: 1;
    }

    .status[data-type=""] {
      opacity: 0;
    }

    .status[data-type="error"] {
      color: var(--warn);
    }

    .status[data-type="ok"] {
      color: var(--accent);
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
      button {
        width: 100%;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Health Dashboard</h1>
      <p class="subtitle" id="today">{{DATE}}</p>
    </header>

    <section class="panel" id="cards">
      <div class="stat" id="card-steps">
        <span class="label">Steps</span>
        <span class="value">--</span>
        <div class="bar"><span></span></div>
        <span class="detail"></span>
      </div>
      <div class="stat" id="card-calories">
        <span class="label">Calories</span>
        <span class="value">--</span>
        <span class="detail"></span>
      </div>
      <div class="stat" id="card-cardio">
        <span class="label">Cardio (7 days)</span>
        <span class="value">--</span>
        <span class="detail"></span>
      </div>
      <div class="stat" id="card-strength">
        <span class="label">Strength (7 days)</span>
        <span class="value">--</span>
        <span class="detail"></span>
      </div>
      <div class="stat" id="card-physio">
        <span class="label">Physio</span>
        <span class="value">--</span>
        <span class="detail"></span>
      </div>
      <div class="stat" id="card-weight">
        <span class="label">Weight</span>
        <span class="value">--</span>
        <span class="detail"></span>
      </div>
    </section>

    <section>
      <h2>Weight</h2>
      <p class="subtitle">Change since start and over trailing windows.</p>
      <div class="chart-card">
        <canvas id="weight-chart" aria-label="Weight chart" role="img"></canvas>
      </div>
    </section>

    <section id="history-section">
      <h2>History</h2>
      <p class="subtitle">Every logged day, newest first.</p>
      <div class="chart-card history-card">
        <table class="history" id="history">
          <thead>
            <tr>
              <th>Date</th>
              <th>Weight</th>
              <th>Steps</th>
              <th>Calories</th>
              <th>Cardio</th>
              <th>Strength</th>
              <th>Physio</th>
            </tr>
          </thead>
          <tbody></tbody>
        </table>
      </div>
    </section>

    <section>
      <h2>Log a day</h2>
      <form class="entry" id="entry-form">
        <label>Date <input name="date" type="date" required /></label>
        <label>Weight (kg) <input name="weight_kg" type="number" step="0.1" min="0" /></label>
        <label>Steps <input name="steps_actual" type="number" min="0" /></label>
        <label>Steps goal <input name="steps_goal" type="number" min="0" /></label>
        <label>Low intensity (min) <input name="cardio_low_intensity_minutes" type="number" min="0" /></label>
        <label>High intensity (min) <input name="cardio_high_intensity_minutes" type="number" min="0" /></label>
        <label>Strength
          <select name="strength_workout_type">
            <option value="">None</option>
            <option>Core</option>
            <option>Lower Body</option>
            <option>Upper Body</option>
            <option>Full Body</option>
          </select>
        </label>
        <label>Physio
          <select name="physio_completed">
            <option value="">Not logged</option>
            <option value="yes">Done</option>
            <option value="no">Skipped</option>
          </select>
        </label>
        <button type="submit">Save</button>
      </form>
    </section>
  </main>

  <div class="status" id="status"></div>

  <script>
    const statusEl = document.getElementById('status');
    const canvas = document.getElementById('weight-chart');
    const form = document.getElementById('entry-form');
    const historyBody = document.querySelector('#history tbody');
    let statusTimer = null;
    let hotspots = [];

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      clearTimeout(statusTimer);
      if (type && type !== 'error') {
        statusTimer = setTimeout(() => setStatus('', ''), 1600);
      }
    };

    const fill = (id, value, detail, progress) => {
      const card = document.getElementById(id);
      card.querySelector('.value').textContent = value;
      card.querySelector('.detail').textContent = detail || '';
      const bar = card.querySelector('.bar span');
      if (bar) {
        bar.style.width = `${Math.round((progress || 0) * 100)}%`;
      }
    };

    const pct = (card) => (card && typeof card.percent === 'number' ? `${card.percent}%` : '--');

    const renderSummary = (s) => {
      fill('card-steps', pct(s.steps.progress), s.steps.streak.message, s.steps.progress.progress);
      fill('card-calories', s.calories.categories.map(pct).join(' / ') || '--', s.calories.date || 'No entries yet');
      fill('card-cardio', `${s.cardio.high_intensity_minutes + s.cardio.low_intensity_minutes} min`,
        `${s.cardio.high_intensity_minutes} high, ${s.cardio.low_intensity_minutes} low`);
      fill('card-strength', `${s.strength.sessions}`, s.strength.last_workout
        ? `Last: ${s.strength.last_workout} (${s.strength.last_workout_date})` : 'No sessions yet');
      fill('card-physio', `${s.physio.completed_days}/7`, s.physio.streak.message);
      const change = typeof s.weight.change_7d === 'number'
        ? `${s.weight.change_7d > 0 ? '+' : ''}${s.weight.change_7d.toFixed(1)} kg this week` : '';
      fill('card-weight', typeof s.weight.latest_kg === 'number' ? `${s.weight.latest_kg.toFixed(1)} kg` : '--', change);
    };

    const paint = (scene) => {
      const ratio = window.devicePixelRatio || 1;
      canvas.width = scene.width * ratio;
      canvas.height = scene.height * ratio;
      const ctx = canvas.getContext('2d');
      ctx.scale(ratio, ratio);
      ctx.font = '12px "Space Grotesk", sans-serif';
      ctx.textBaseline = 'top';
      hotspots = [];

      for (const cmd of scene.commands) {
        switch (cmd.kind) {
          case 'clear':
            ctx.clearRect(0, 0, scene.width, scene.height);
            break;
          case 'area':
            ctx.fillStyle = cmd.color;
            ctx.beginPath();
            ctx.moveTo(cmd.points[0].x, cmd.baseline);
            cmd.points.forEach((p) => ctx.lineTo(p.x, p.y));
            ctx.lineTo(cmd.points[cmd.points.length - 1].x, cmd.baseline);
            ctx.closePath();
            ctx.fill();
            break;
          case 'polyline':
            ctx.strokeStyle = cmd.color;
            ctx.lineWidth = 2.5;
            ctx.beginPath();
            cmd.points.forEach((p, i) => (i === 0 ? ctx.moveTo(p.x, p.y) : ctx.lineTo(p.x, p.y)));
            if (cmd.points.length === 1) {
              ctx.arc(cmd.points[0].x, cmd.points[0].y, 1.5, 0, Math.PI * 2);
            }
            ctx.stroke();
            break;
          case 'point':
            hotspots.push(cmd);
            if (cmd.radius <= 0) {
              break;
            }
            ctx.fillStyle = 'white';
            ctx.strokeStyle = cmd.color;
            ctx.lineWidth = 2;
            ctx.beginPath();
            ctx.arc(cmd.at.x, cmd.at.y, cmd.radius, 0, Math.PI * 2);
            ctx.fill();
            ctx.stroke();
            break;
          case 'tick':
            ctx.fillStyle = '#7a746d';
            ctx.textAlign = 'center';
            ctx.fillText(cmd.text, cmd.x, scene.area.bottom + 10);
            break;
          case 'connector':
            ctx.strokeStyle = cmd.color;
            ctx.lineWidth = 1;
            ctx.beginPath();
            ctx.moveTo(cmd.from.x, cmd.from.y);
            ctx.lineTo(cmd.to.x, cmd.to.y);
            ctx.stroke();
            break;
          case 'label':
            ctx.fillStyle = 'white';
            ctx.strokeStyle = cmd.color;
            ctx.fillRect(cmd.origin.x, cmd.origin.y, cmd.width, cmd.height);
            ctx.strokeRect(cmd.origin.x, cmd.origin.y, cmd.width, cmd.height);
            ctx.fillStyle = cmd.color;
            ctx.textAlign = 'center';
            ctx.fillText(cmd.text, cmd.origin.x + cmd.width / 2, cmd.origin.y + 3);
            break;
          case 'placeholder':
            ctx.fillStyle = '#7a746d';
            ctx.textAlign = 'center';
            ctx.fillText(cmd.message, scene.width / 2, scene.height / 2);
            break;
        }
      }
    };

    canvas.addEventListener('mousemove', (event) => {
      const rect = canvas.getBoundingClientRect();
      const x = event.clientX - rect.left;
      const y = event.clientY - rect.top;
      let nearest = null;
      let best = 64;
      for (const spot of hotspots) {
        const d = (spot.at.x - x) ** 2 + (spot.at.y - y) ** 2;
        if (d < best) {
          best = d;
          nearest = spot;
        }
      }
      canvas.title = nearest ? nearest.tooltip : '';
    });

    const cell = (value) => {
      const td = document.createElement('td');
      td.textContent = value === null || value === undefined || value === '' ? '--' : value;
      return td;
    };

    const renderHistory = (entries) => {
      historyBody.replaceChildren();
      for (const e of [...entries].reverse()) {
        const calories = ['green', 'yellow', 'orange']
          .map((c) => e[`calories_${c}_actual`])
          .filter((v) => typeof v === 'number');
        const cardio = (e.cardio_high_intensity_minutes || 0) + (e.cardio_low_intensity_minutes || 0);
        const physio = e.physio_completed === true ? 'Done' : e.physio_completed === false ? 'Skipped' : null;
        const row = document.createElement('tr');
        row.append(
          cell(e.date),
          cell(typeof e.weight_kg === 'number' ? e.weight_kg.toFixed(1) : null),
          cell(e.steps_actual),
          cell(calories.length ? calories.reduce((a, b) => a + b, 0) : null),
          cell(cardio ? `${cardio} min` : null),
          cell(e.strength_workout_type),
          cell(physio)
        );
        historyBody.append(row);
      }
    };

    const loadHistory = async () => {
      const res = await fetch('/api/daily-data');
      if (!res.ok) {
        throw new Error('Unable to load history');
      }
      renderHistory(await res.json());
    };

    const loadSummary = async () => {
      const res = await fetch('/api/summary');
      if (!res.ok) {
        throw new Error('Unable to load summary');
      }
      renderSummary(await res.json());
    };

    const loadChart = async () => {
      const width = Math.max(320, Math.round(canvas.clientWidth || 800));
      const res = await fetch(`/api/charts/weight?width=${width}&height=320`);
      if (!res.ok) {
        throw new Error('Unable to load weight chart');
      }
      paint((await res.json()).scene);
    };

    const refresh = async () => {
      await Promise.all([loadSummary(), loadChart(), loadHistory()]);
    };

    const numberOrNull = (value) => (value === '' ? null : Number(value));
    const triState = (value) => (value === 'yes' ? true : value === 'no' ? false : null);

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      const data = new FormData(form);
      const body = {
        date: data.get('date'),
        weight_kg: numberOrNull(data.get('weight_kg')),
        steps_actual: numberOrNull(data.get('steps_actual')),
        steps_goal: numberOrNull(data.get('steps_goal')),
        cardio_low_intensity_minutes: numberOrNull(data.get('cardio_low_intensity_minutes')),
        cardio_high_intensity_minutes: numberOrNull(data.get('cardio_high_intensity_minutes')),
        strength_workout_type: data.get('strength_workout_type') || null,
        physio_completed: triState(data.get('physio_completed'))
      };
      setStatus('Saving...', 'info');
      fetch('/api/daily-data', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      })
        .then(async (res) => {
          if (!res.ok) {
            throw new Error((await res.text()) || 'Request failed');
          }
          setStatus('Saved', 'ok');
          return refresh();
        })
        .catch((err) => setStatus(err.message, 'error'));
    });

    form.elements.date.valueAsDate = new Date();
    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
